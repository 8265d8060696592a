use fltk::{
    button::Button,
    dialog,
    enums::{Color, Font},
    frame::Frame,
    group::Flex,
    prelude::*,
    window::Window,
};

const PROJECT_URL: &str = "https://github.com/pdfslicer/pdfslicer";

/// Show About dialog
pub fn show_about_dialog() {
    let version = env!("CARGO_PKG_VERSION");
    let mut dialog = Window::default()
        .with_size(420, 330)
        .with_label("About PDF Slicer")
        .center_screen();
    dialog.make_modal(true);

    let mut flex = Flex::new(10, 10, 400, 310, None);
    flex.set_type(fltk::group::FlexType::Column);
    flex.set_spacing(10);

    let mut title = Frame::default();
    title.set_label("PDF Slicer");
    title.set_label_size(24);
    title.set_label_font(Font::HelveticaBold);
    flex.fixed(&title, 40);

    let mut version_frame = Frame::default();
    version_frame.set_label(&format!("Version {}", version));
    version_frame.set_label_size(14);
    flex.fixed(&version_frame, 25);

    let mut desc_frame = Frame::default();
    desc_frame.set_label("Reorder, rotate and remove pages of PDF documents");
    desc_frame.set_label_size(12);
    desc_frame.set_label_color(Color::from_rgb(100, 100, 100));
    flex.fixed(&desc_frame, 25);

    let info_text = format!(
        "Copyright \u{00a9} 2026 PDF Slicer Contributors\n\
         Licensed under the MIT License\n\n\
         Built with Rust \u{1f980} and FLTK\n\
         Page previews by Poppler's pdftoppm\n\n\
         {}",
        PROJECT_URL
    );

    let mut info_frame = Frame::default();
    info_frame.set_label(&info_text);
    info_frame.set_label_size(12);
    info_frame.set_align(fltk::enums::Align::Center | fltk::enums::Align::Inside);
    flex.fixed(&info_frame, 130);

    let mut button_row = Flex::default();
    button_row.set_type(fltk::group::FlexType::Row);
    button_row.set_spacing(10);
    let mut website_btn = Button::default().with_label("Visit Project Page");
    let mut close_btn = Button::default().with_label("Close");
    button_row.end();
    flex.fixed(&button_row, 35);

    flex.end();
    dialog.end();

    website_btn.set_callback(move |_| {
        if let Err(e) = open::that(PROJECT_URL) {
            dialog::alert_default(&format!("Failed to open browser: {}", e));
        }
    });

    let mut dialog_close = dialog.clone();
    close_btn.set_callback(move |_| {
        dialog_close.hide();
    });

    dialog.show();
    super::run_dialog(&dialog);
}
