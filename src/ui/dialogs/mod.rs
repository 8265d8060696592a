pub mod about;

use fltk::{app, prelude::*, window::Window};

/// Pump events while the dialog is shown, closing it when the app is
/// quitting (the main window was closed while the dialog was open).
pub fn run_dialog(dialog: &Window) {
    while dialog.shown() {
        app::wait();
        if app::should_program_quit() {
            let mut d = dialog.clone();
            d.hide();
        }
    }
}
