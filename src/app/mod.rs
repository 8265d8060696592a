//! Application layer: message dispatch, coordination, settings, and the
//! background save task.

pub mod actions;
pub mod error;
pub mod messages;
pub mod save_task;
pub mod settings;
pub mod state;
pub mod zoom;

use fltk::{
    app,
    enums::{Event, Key},
    prelude::*,
};

use self::messages::Message;
use self::settings::SettingsManager;
use self::state::AppState;

/// Build the UI and run the event loop until the user quits.
///
/// Every widget callback only sends a [`Message`]; all real work happens in
/// [`AppState::handle`], driven by the channel drained here.
pub fn run() {
    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    crate::ui::theme::apply_theme();

    let (sender, receiver) = app::channel::<Message>();

    let settings = SettingsManager::new();
    let window_state = settings.load_window_state();

    let mut widgets = crate::ui::main_window::build_main_window(&window_state, &sender);
    crate::ui::menu::build_menu(&mut widgets.menu, &sender);

    // The window callback fires for both the close button and Escape; close
    // requests go through the dispatch loop so they can be refused while a
    // save is in flight.
    widgets.window.set_callback({
        let sender = sender;
        move |_| {
            if app::event() == Event::Close {
                sender.send(Message::CloseRequest);
            } else if app::event_key() == Key::Escape {
                sender.send(Message::CancelSelection);
            }
        }
    });

    widgets.window.resize_callback({
        let sender = sender;
        move |_, _, _, w, h| sender.send(Message::WindowResized(w, h))
    });

    widgets.window.show();
    if window_state.is_maximized {
        widgets.window.maximize();
    }

    let mut state = AppState::new(widgets, sender, settings, window_state);
    state.refresh_actions();

    while app.wait() {
        if let Some(message) = receiver.recv() {
            if state.handle(message) {
                break;
            }
        }
    }

    app::quit();
}
