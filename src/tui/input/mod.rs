mod edit;
mod form;
mod mouse;
mod navigate;
mod picker;
mod text;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

pub use mouse::handle_mouse;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay intercepts ?, q and Esc
    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc
        ) {
            app.show_help = false;
        }
        return;
    }

    // Creation modal intercepts everything else
    if app.show_form {
        form::handle_form(app, key);
        return;
    }

    match app.mode {
        Mode::Edit => edit::handle_edit(app, key),
        Mode::Navigate => {
            if let Some((id, picker)) = app.active_picker() {
                picker::handle_picker(app, &id, picker, key);
            } else {
                navigate::handle_navigate(app, key);
            }
        }
    }
}
