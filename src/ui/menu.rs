use fltk::{
    app::Sender,
    enums::{Key, Shortcut},
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::messages::Message;

// Menu item paths, shared with the action-state application code.
pub const OPEN: &str = "File/Open...";
pub const SAVE: &str = "File/Save As...";
pub const QUIT: &str = "File/Quit";
pub const UNDO: &str = "Edit/Undo";
pub const REDO: &str = "Edit/Redo";
pub const CANCEL_SELECTION: &str = "Edit/Cancel Selection";
pub const ROTATE_LEFT: &str = "Pages/Rotate Left";
pub const ROTATE_RIGHT: &str = "Pages/Rotate Right";
pub const REMOVE_SELECTED: &str = "Pages/Remove Selected";
pub const REMOVE_UNSELECTED: &str = "Pages/Remove Unselected";
pub const REMOVE_PREVIOUS: &str = "Pages/Remove Previous Pages";
pub const REMOVE_NEXT: &str = "Pages/Remove Next Pages";
pub const MOVE_LEFT: &str = "Pages/Move Left";
pub const MOVE_RIGHT: &str = "Pages/Move Right";
pub const PREVIEW: &str = "Pages/Preview...";
pub const ZOOM_IN: &str = "View/Zoom In";
pub const ZOOM_OUT: &str = "View/Zoom Out";
pub const ABOUT: &str = "Help/About PDF Slicer";

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>) {
    let s = sender;

    // File
    menu.add(OPEN, Shortcut::Ctrl | 'o', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenDocument) });
    menu.add(SAVE, Shortcut::Ctrl | 's', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::SaveDocument) });
    menu.add(QUIT, Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::CloseRequest) });

    // Edit
    menu.add(UNDO, Shortcut::Ctrl | 'z', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Undo) });
    menu.add(REDO, Shortcut::Ctrl | Shortcut::Shift | 'z', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::Redo) });
    menu.add(CANCEL_SELECTION, Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::CancelSelection) });

    // Pages
    menu.add(ROTATE_LEFT, Shortcut::Ctrl | Key::Left, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::RotateLeft) });
    menu.add(ROTATE_RIGHT, Shortcut::Ctrl | Key::Right, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::RotateRight) });
    menu.add(REMOVE_SELECTED, Shortcut::from_key(Key::Delete), MenuFlag::Normal, { let s = *s; move |_| s.send(Message::RemoveSelected) });
    menu.add(REMOVE_UNSELECTED, Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::RemoveUnselected) });
    menu.add(REMOVE_PREVIOUS, Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::RemovePrevious) });
    menu.add(REMOVE_NEXT, Shortcut::None, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::RemoveNext) });
    menu.add(MOVE_LEFT, Shortcut::Ctrl | Shortcut::Shift | Key::Left, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::MoveLeft) });
    menu.add(MOVE_RIGHT, Shortcut::Ctrl | Shortcut::Shift | Key::Right, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::MoveRight) });
    menu.add(PREVIEW, Shortcut::Ctrl | 'p', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::PreviewSelected) });

    // View
    menu.add(ZOOM_IN, Shortcut::Ctrl | '+', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ZoomIn) });
    menu.add(ZOOM_OUT, Shortcut::Ctrl | '-', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ZoomOut) });

    // Help
    menu.add(ABOUT, Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowAbout) });
}
