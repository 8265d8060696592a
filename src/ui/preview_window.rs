use std::path::Path;

use fltk::{
    button::Button,
    dialog,
    frame::Frame,
    group::{Flex, Scroll, ScrollType},
    image::SharedImage,
    prelude::*,
    window::Window,
};

use crate::pdf::render::ThumbnailStore;
use crate::pdf::Page;

/// Larger edge of the rendered preview image, in pixels.
const PREVIEW_SCALE_TO: i32 = 700;

/// Show a single page at preview size in a modal window.
///
/// The raster comes from the source file; a pending user rotation is noted in
/// the window title instead of being baked into the image.
pub fn show_preview(source: &Path, page: &Page) {
    let store = match ThumbnailStore::generate_page(source, page.number, PREVIEW_SCALE_TO) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %err, page = page.number, "page preview failed");
            dialog::alert_default("The page could not be rendered");
            return;
        }
    };

    let Some(image_path) = store.path(page.number) else {
        tracing::error!(page = page.number, "renderer produced no image");
        dialog::alert_default("The page could not be rendered");
        return;
    };

    let image = match SharedImage::load(image_path) {
        Ok(image) => image,
        Err(err) => {
            tracing::error!(error = %err, "failed to load rendered page image");
            dialog::alert_default("The page could not be rendered");
            return;
        }
    };

    let title = if page.rotation == 0 {
        format!("Page {} - Preview", page.number)
    } else {
        format!("Page {} - Preview (rotated {}\u{00b0})", page.number, page.rotation)
    };

    let mut dialog = Window::default()
        .with_size(760, 840)
        .with_label(&title)
        .center_screen();
    dialog.make_modal(true);
    dialog.make_resizable(true);

    let mut flex = Flex::new(10, 10, 740, 820, None);
    flex.set_type(fltk::group::FlexType::Column);
    flex.set_spacing(10);

    let mut scroll = Scroll::default();
    scroll.set_type(ScrollType::Both);
    let mut frame = Frame::new(10, 10, image.width(), image.height(), None);
    frame.set_image(Some(image));
    scroll.end();

    let mut close_btn = Button::default().with_label("Close");
    flex.fixed(&close_btn, 35);

    flex.end();
    dialog.end();

    let mut dialog_close = dialog.clone();
    close_btn.set_callback(move |_| {
        dialog_close.hide();
    });

    dialog.show();
    super::dialogs::run_dialog(&dialog);
}
