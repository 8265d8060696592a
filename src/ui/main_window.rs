use fltk::{
    app::Sender,
    button::Button,
    enums::{Color, Font, FrameType},
    frame::Frame,
    group::{Flex, Group},
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use super::page_view::PageView;
use crate::app::messages::Message;
use crate::app::settings::WindowState;
use crate::app::zoom::ZoomLevel;

pub const MENU_HEIGHT: i32 = 30;
pub const TOOLBAR_HEIGHT: i32 = 38;
pub const BANNER_HEIGHT: i32 = 28;

pub struct Toolbar {
    pub open: Button,
    pub save: Button,
    pub undo: Button,
    pub redo: Button,
    pub rotate_left: Button,
    pub rotate_right: Button,
    pub remove: Button,
    pub move_left: Button,
    pub move_right: Button,
    pub preview: Button,
    pub zoom_out: Button,
    pub zoom_in: Button,
}

pub struct MainWidgets {
    pub window: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub toolbar: Toolbar,
    pub banner: Frame,
    pub welcome: Group,
    pub view: PageView,
}

pub fn build_main_window(window_state: &WindowState, sender: &Sender<Message>) -> MainWidgets {
    let (w, h) = (window_state.width, window_state.height);

    let mut window = Window::new(100, 100, w, h, "PDF Slicer");
    window.set_xclass("PDF Slicer");
    window.size_range(640, 440, 0, 0);

    let mut flex = Flex::new(0, 0, w, h, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, MENU_HEIGHT, "");
    flex.fixed(&menu, MENU_HEIGHT);

    let (toolbar_flex, toolbar) = build_toolbar(sender);
    flex.fixed(&toolbar_flex, TOOLBAR_HEIGHT);

    // Saving indicator (initially hidden)
    let mut banner = Frame::default().with_size(0, 0);
    banner.set_frame(FrameType::FlatBox);
    banner.set_color(Color::from_rgb(255, 250, 205));
    banner.set_label_color(Color::Black);
    banner.set_label_size(13);
    banner.hide();
    flex.fixed(&banner, 0);

    // Welcome screen and page grid share the remaining area; exactly one of
    // them is visible at a time.
    let top = MENU_HEIGHT + TOOLBAR_HEIGHT;
    let stack = Group::new(0, top, w, h - top, None);

    let welcome = build_welcome(0, top, w, h - top, sender);
    let view = PageView::new(0, top, w, h - top, ZoomLevel::smallest().current(), *sender);

    stack.end();

    flex.end();
    window.resizable(&flex);
    window.end();

    MainWidgets {
        window,
        flex,
        menu,
        toolbar,
        banner,
        welcome,
        view,
    }
}

fn build_toolbar(sender: &Sender<Message>) -> (Flex, Toolbar) {
    let mut row = Flex::default().with_size(0, TOOLBAR_HEIGHT);
    row.set_type(fltk::group::FlexType::Row);
    row.set_spacing(6);
    row.set_margin(3);

    let mut add = |label: &str, tooltip: &str, width: i32, message: Message| -> Button {
        let mut button = Button::default().with_label(label);
        button.set_tooltip(tooltip);
        row.fixed(&button, width);
        let sender = *sender;
        button.set_callback(move |_| sender.send(message));
        button
    };

    let open = add("Open...", "Open a PDF document", 70, Message::OpenDocument);
    let save = add("Save...", "Save the current arrangement", 70, Message::SaveDocument);
    let undo = add("Undo", "Undo the last page edit", 56, Message::Undo);
    let redo = add("Redo", "Redo the last undone edit", 56, Message::Redo);
    let rotate_left = add(
        "\u{27f2} Rotate",
        "Rotate the selected pages left",
        84,
        Message::RotateLeft,
    );
    let rotate_right = add(
        "Rotate \u{27f3}",
        "Rotate the selected pages right",
        84,
        Message::RotateRight,
    );
    let remove = add("Remove", "Remove the selected pages", 72, Message::RemoveSelected);
    let move_left = add("\u{25c2} Move", "Move the selected page left", 72, Message::MoveLeft);
    let move_right = add("Move \u{25b8}", "Move the selected page right", 72, Message::MoveRight);
    let preview = add("Preview", "Preview the selected page", 72, Message::PreviewSelected);
    let zoom_out = add("\u{2212}", "Smaller thumbnails", 32, Message::ZoomOut);
    let zoom_in = add("+", "Larger thumbnails", 32, Message::ZoomIn);

    // Flexible spacer swallows the leftover width.
    Frame::default();

    row.end();

    (
        row,
        Toolbar {
            open,
            save,
            undo,
            redo,
            rotate_left,
            rotate_right,
            remove,
            move_left,
            move_right,
            preview,
            zoom_out,
            zoom_in,
        },
    )
}

fn build_welcome(x: i32, y: i32, w: i32, h: i32, sender: &Sender<Message>) -> Group {
    let welcome = Group::new(x, y, w, h, None);

    let mut label = Frame::new(x, y + h / 2 - 70, w, 30, "Open a PDF document to get started");
    label.set_label_size(19);
    label.set_label_font(Font::HelveticaBold);

    let mut open_button = Button::new(x + w / 2 - 85, y + h / 2 - 20, 170, 36, "Open Document...");
    let sender = *sender;
    open_button.set_callback(move |_| sender.send(Message::OpenDocument));

    welcome.end();
    welcome
}
