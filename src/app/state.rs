use std::path::{Path, PathBuf};

use fltk::{
    app::{self, Sender},
    button::Button,
    dialog,
    frame::Frame,
    group::{Flex, Group},
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use super::actions::{ActionContext, ActionStates};
use super::messages::Message;
use super::save_task::{self, SaveTask};
use super::settings::{SettingsManager, WindowState};
use super::zoom::ZoomLevel;
use crate::pdf::render::{self, ThumbnailStore};
use crate::pdf::saver::SaveJob;
use crate::pdf::Document;
use crate::ui::main_window::{MainWidgets, Toolbar, BANNER_HEIGHT};
use crate::ui::page_view::PageView;
use crate::ui::{dialogs, file_dialogs, menu, preview_window};

const SAVING_LABEL: &str = "Saving document...";
const SAVED_LABEL: &str = "Document saved \u{2713}";

pub struct AppState {
    pub document: Option<Document>,
    thumbs: Option<ThumbnailStore>,
    renderer_available: bool,
    pub window: Window,
    flex: Flex,
    menu: MenuBar,
    toolbar: Toolbar,
    banner: Frame,
    welcome: Group,
    view: PageView,
    sender: Sender<Message>,
    settings: SettingsManager,
    pub window_state: WindowState,
    save_task: SaveTask,
    zoom: ZoomLevel,
    /// Last directory used in a file open/save dialog.
    last_directory: Option<PathBuf>,
}

impl AppState {
    pub fn new(
        widgets: MainWidgets,
        sender: Sender<Message>,
        settings: SettingsManager,
        window_state: WindowState,
    ) -> Self {
        let renderer_available = render::renderer_available();
        if !renderer_available {
            tracing::warn!("pdftoppm not found; page thumbnails and previews are disabled");
        }

        let MainWidgets {
            window,
            flex,
            menu,
            toolbar,
            banner,
            welcome,
            view,
        } = widgets;

        Self {
            document: None,
            thumbs: None,
            renderer_available,
            window,
            flex,
            menu,
            toolbar,
            banner,
            welcome,
            view,
            sender,
            settings,
            window_state,
            save_task: SaveTask::default(),
            zoom: ZoomLevel::smallest(),
            last_directory: None,
        }
    }

    /// Handle one message. Returns `true` when the app should exit.
    pub fn handle(&mut self, message: Message) -> bool {
        match message {
            Message::OpenDocument => self.open_document(),
            Message::SaveDocument => self.save_document(),
            Message::CloseRequest => return self.handle_close(),

            Message::Undo => {
                if self.document.as_mut().is_some_and(|doc| doc.undo()) {
                    self.rebuild_view(&[]);
                    self.refresh_actions();
                }
            }
            Message::Redo => {
                if self.document.as_mut().is_some_and(|doc| doc.redo()) {
                    self.rebuild_view(&[]);
                    self.refresh_actions();
                }
            }

            Message::RemoveSelected => self.remove_selected(),
            Message::RemoveUnselected => self.remove_unselected(),
            Message::RemovePrevious => self.remove_previous(),
            Message::RemoveNext => self.remove_next(),
            Message::RotateLeft => self.rotate_selection(false),
            Message::RotateRight => self.rotate_selection(true),
            Message::MoveLeft => self.move_selection(-1),
            Message::MoveRight => self.move_selection(1),

            Message::CancelSelection => {
                self.view.clear_selection();
                self.refresh_actions();
            }
            Message::SelectionChanged => self.refresh_actions(),

            Message::ZoomIn => {
                if self.zoom.zoom_in() {
                    self.apply_zoom();
                }
            }
            Message::ZoomOut => {
                if self.zoom.zoom_out() {
                    self.apply_zoom();
                }
            }

            Message::PreviewSelected => {
                if let Some(index) = self.single_selection() {
                    if let Some(document) = &self.document {
                        preview_window::show_preview(document.path(), &document.pages()[index]);
                    }
                }
            }
            Message::ShowAbout => dialogs::about::show_about_dialog(),

            Message::SaveSucceeded => {
                self.save_task.finish(true);
                self.banner_saved();
                self.refresh_actions();
            }
            Message::SaveFailed => {
                self.save_task.finish(false);
                self.banner_hide();
                self.refresh_actions();
                dialog::alert_default("The current document could not be saved");
            }

            Message::WindowResized(w, h) => {
                if !self.window.maximized() {
                    self.window_state.width = w;
                    self.window_state.height = h;
                }
                self.view.relayout();
            }
        }

        false
    }

    // --- File operations ---

    fn open_document(&mut self) {
        if self.save_task.is_running() {
            return;
        }
        if let Some(path) = file_dialogs::native_open_dialog(self.last_directory.as_ref()) {
            if let Some(parent) = path.parent() {
                self.last_directory = Some(parent.to_path_buf());
            }
            self.try_open_document(&path);
        }
    }

    fn try_open_document(&mut self, path: &Path) {
        match Document::open(path) {
            Ok(document) => {
                tracing::info!(path = %path.display(), pages = document.page_count(), "opened document");
                self.window
                    .set_label(&format!("{} - PDF Slicer", document.basename()));
                self.document = Some(document);
                self.regenerate_thumbnails();
                self.show_editor();
                self.rebuild_view(&[]);
                self.refresh_actions();
            }
            Err(err) => {
                tracing::error!(error = %err, path = %path.display(), "the file could not be opened");
                dialog::alert_default("The selected file could not be opened");
            }
        }
    }

    fn save_document(&mut self) {
        let Some(document) = &self.document else {
            return;
        };
        if self.save_task.is_running() || document.page_count() == 0 {
            return;
        }

        let preset = document.basename();
        if let Some(dest) = file_dialogs::native_save_dialog(&preset, self.last_directory.as_ref())
        {
            if let Some(parent) = dest.parent() {
                self.last_directory = Some(parent.to_path_buf());
            }
            self.try_save_document(dest);
        }
    }

    fn try_save_document(&mut self, dest: PathBuf) {
        let Some(document) = &self.document else {
            return;
        };
        if !self.save_task.try_begin() {
            return;
        }

        tracing::info!(path = %dest.display(), "saving document");
        save_task::spawn_save(SaveJob::new(document), dest, self.sender);
        self.banner_saving();
        self.refresh_actions();
    }

    fn handle_close(&mut self) -> bool {
        if self.save_task.blocks_close() {
            tracing::info!("ignoring close request while a save is in flight");
            return false;
        }
        self.persist_window_state();
        true
    }

    fn persist_window_state(&mut self) {
        self.window_state.is_maximized = self.window.maximized();
        if let Err(err) = self.settings.save_window_state(&self.window_state) {
            tracing::warn!(error = %err, "failed to persist window state");
        }
    }

    // --- Page operations ---

    fn remove_selected(&mut self) {
        let selected = self.view.selected_indexes();
        if selected.is_empty() {
            return;
        }
        let Some(document) = self.document.as_mut() else {
            return;
        };
        document.remove_pages(&selected);
        self.rebuild_view(&[]);
        self.refresh_actions();
    }

    fn remove_unselected(&mut self) {
        let selected = self.view.selected_indexes();
        if selected.is_empty() {
            return;
        }
        let Some(document) = self.document.as_mut() else {
            return;
        };
        let unselected: Vec<usize> = (0..document.page_count())
            .filter(|index| !selected.contains(index))
            .collect();
        if unselected.is_empty() {
            return;
        }
        document.remove_pages(&unselected);

        // The previously selected pages are exactly what is left.
        let keep: Vec<usize> = (0..self.page_count()).collect();
        self.rebuild_view(&keep);
        self.refresh_actions();
    }

    fn remove_previous(&mut self) {
        let Some(index) = self.single_selection() else {
            return;
        };
        if index == 0 {
            return;
        }
        if let Some(document) = self.document.as_mut() {
            document.remove_page_range(0, index - 1);
        }
        self.rebuild_view(&[0]);
        self.refresh_actions();
    }

    fn remove_next(&mut self) {
        let Some(index) = self.single_selection() else {
            return;
        };
        let count = self.page_count();
        if index + 1 >= count {
            return;
        }
        if let Some(document) = self.document.as_mut() {
            document.remove_page_range(index + 1, count - 1);
        }
        self.rebuild_view(&[index]);
        self.refresh_actions();
    }

    fn rotate_selection(&mut self, clockwise: bool) {
        let selected = self.view.selected_indexes();
        if selected.is_empty() {
            return;
        }
        let Some(document) = self.document.as_mut() else {
            return;
        };
        if clockwise {
            document.rotate_pages_right(&selected);
        } else {
            document.rotate_pages_left(&selected);
        }

        if let Some(document) = self.document.as_ref() {
            self.view.refresh_labels(document);
        }
        self.refresh_actions();
    }

    fn move_selection(&mut self, delta: i32) {
        let Some(index) = self.single_selection() else {
            return;
        };
        let target = index as i64 + delta as i64;
        if target < 0 || target as usize >= self.page_count() {
            return;
        }
        let target = target as usize;

        if let Some(document) = self.document.as_mut() {
            document.move_page(index, target);
        }
        self.rebuild_view(&[target]);
        self.refresh_actions();
    }

    // --- View ---

    fn apply_zoom(&mut self) {
        self.view.set_zoom(self.zoom.current());
        if self.document.is_some() {
            let selected = self.view.selected_indexes();
            self.regenerate_thumbnails();
            self.rebuild_view(&selected);
        }
        self.refresh_actions();
    }

    fn regenerate_thumbnails(&mut self) {
        self.thumbs = None;
        if !self.renderer_available {
            return;
        }
        let Some(document) = &self.document else {
            return;
        };
        match ThumbnailStore::generate(document.path(), self.zoom.current()) {
            Ok(store) => self.thumbs = Some(store),
            Err(err) => tracing::warn!(error = %err, "thumbnail rendering failed"),
        }
    }

    fn rebuild_view(&mut self, selected: &[usize]) {
        let Some(document) = self.document.as_ref() else {
            return;
        };
        self.view.rebuild(document, self.thumbs.as_ref(), selected);
    }

    fn show_editor(&mut self) {
        self.welcome.hide();
        self.view.scroll.show();
    }

    fn single_selection(&self) -> Option<usize> {
        match self.view.selected_indexes().as_slice() {
            [index] => Some(*index),
            _ => None,
        }
    }

    fn page_count(&self) -> usize {
        self.document.as_ref().map_or(0, Document::page_count)
    }

    // --- Saving banner ---

    fn banner_saving(&mut self) {
        self.banner.set_label(SAVING_LABEL);
        self.banner.show();
        self.flex.fixed(&self.banner, BANNER_HEIGHT);
        self.window.redraw();
    }

    fn banner_saved(&mut self) {
        self.banner.set_label(SAVED_LABEL);
        self.window.redraw();

        let mut banner = self.banner.clone();
        let mut flex = self.flex.clone();
        let mut window = self.window.clone();
        app::add_timeout3(2.0, move |_| {
            // A newer save may have reclaimed the banner in the meantime.
            if banner.label() == SAVED_LABEL {
                banner.hide();
                flex.fixed(&banner, 0);
                window.redraw();
            }
        });
    }

    fn banner_hide(&mut self) {
        self.banner.hide();
        self.flex.fixed(&self.banner, 0);
        self.window.redraw();
    }

    // --- Action enablement ---

    pub fn refresh_actions(&mut self) {
        let selected = self.view.selected_indexes();
        let states = ActionStates::compute(&ActionContext {
            page_count: self.document.as_ref().map(Document::page_count),
            selected: &selected,
            can_undo: self.document.as_ref().is_some_and(Document::can_undo),
            can_redo: self.document.as_ref().is_some_and(Document::can_redo),
            can_zoom_in: self.zoom.can_zoom_in(),
            can_zoom_out: self.zoom.can_zoom_out(),
            saving: self.save_task.is_running(),
        });
        self.apply_action_states(&states);
    }

    fn apply_action_states(&mut self, states: &ActionStates) {
        set_menu_item(&self.menu, menu::OPEN, states.open);
        set_menu_item(&self.menu, menu::SAVE, states.save);
        set_menu_item(&self.menu, menu::UNDO, states.undo);
        set_menu_item(&self.menu, menu::REDO, states.redo);
        set_menu_item(&self.menu, menu::CANCEL_SELECTION, states.cancel_selection);
        set_menu_item(&self.menu, menu::ROTATE_LEFT, states.rotate_left);
        set_menu_item(&self.menu, menu::ROTATE_RIGHT, states.rotate_right);
        set_menu_item(&self.menu, menu::REMOVE_SELECTED, states.remove_selected);
        set_menu_item(&self.menu, menu::REMOVE_UNSELECTED, states.remove_unselected);
        set_menu_item(&self.menu, menu::REMOVE_PREVIOUS, states.remove_previous);
        set_menu_item(&self.menu, menu::REMOVE_NEXT, states.remove_next);
        set_menu_item(&self.menu, menu::MOVE_LEFT, states.move_left);
        set_menu_item(&self.menu, menu::MOVE_RIGHT, states.move_right);
        set_menu_item(&self.menu, menu::PREVIEW, states.preview);
        set_menu_item(&self.menu, menu::ZOOM_IN, states.zoom_in);
        set_menu_item(&self.menu, menu::ZOOM_OUT, states.zoom_out);

        set_button(&mut self.toolbar.open, states.open);
        set_button(&mut self.toolbar.save, states.save);
        set_button(&mut self.toolbar.undo, states.undo);
        set_button(&mut self.toolbar.redo, states.redo);
        set_button(&mut self.toolbar.rotate_left, states.rotate_left);
        set_button(&mut self.toolbar.rotate_right, states.rotate_right);
        set_button(&mut self.toolbar.remove, states.remove_selected);
        set_button(&mut self.toolbar.move_left, states.move_left);
        set_button(&mut self.toolbar.move_right, states.move_right);
        set_button(&mut self.toolbar.preview, states.preview);
        set_button(&mut self.toolbar.zoom_out, states.zoom_out);
        set_button(&mut self.toolbar.zoom_in, states.zoom_in);

        self.menu.redraw();
    }
}

fn set_menu_item(menu: &MenuBar, path: &str, enabled: bool) {
    if let Some(mut item) = menu.find_item(path) {
        if enabled {
            item.activate();
        } else {
            item.deactivate();
        }
    }
}

fn set_button(button: &mut Button, enabled: bool) {
    if enabled {
        button.activate();
    } else {
        button.deactivate();
    }
}
