pub mod dialogs;
pub mod file_dialogs;
pub mod main_window;
pub mod menu;
pub mod page_view;
pub mod preview_window;
pub mod theme;
