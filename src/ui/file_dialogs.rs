use std::path::PathBuf;

use fltk::dialog::{FileDialogOptions, FileDialogType, NativeFileChooser};

const PDF_FILTER: &str = "PDF Documents\t*.pdf";

/// Native open dialog, single selection, filtered to PDF files.
pub fn native_open_dialog(directory: Option<&PathBuf>) -> Option<PathBuf> {
    let mut chooser = NativeFileChooser::new(FileDialogType::BrowseFile);
    chooser.set_title("Open Document");
    chooser.set_filter(PDF_FILTER);
    if let Some(dir) = directory {
        let _ = chooser.set_directory(dir);
    }
    chooser.show();

    let filename = chooser.filename();
    if filename.as_os_str().is_empty() {
        None
    } else {
        Some(filename)
    }
}

/// Native save dialog with overwrite confirmation. Appends the `.pdf`
/// extension when the user leaves it off.
pub fn native_save_dialog(preset_name: &str, directory: Option<&PathBuf>) -> Option<PathBuf> {
    let mut chooser = NativeFileChooser::new(FileDialogType::BrowseSaveFile);
    chooser.set_title("Save Document");
    chooser.set_filter(PDF_FILTER);
    chooser.set_option(FileDialogOptions::SaveAsConfirm);
    chooser.set_preset_file(preset_name);
    if let Some(dir) = directory {
        let _ = chooser.set_directory(dir);
    }
    chooser.show();

    let mut filename = chooser.filename();
    if filename.as_os_str().is_empty() {
        return None;
    }
    if filename.extension().is_none() {
        filename.set_extension("pdf");
    }
    Some(filename)
}
