use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::text::edit_line;

/// Keys while the creation modal is open
pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('k') if app.form.focus.is_choice() => {
            app.form.cycle_choice(false)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('j') | KeyCode::Char(' ')
            if app.form.focus.is_choice() =>
        {
            app.form.cycle_choice(true)
        }
        _ => {
            if let Some((buffer, cursor)) = app.form.focused_text_mut()
                && edit_line(buffer, cursor, key)
            {
                app.form.error = None;
            }
        }
    }
}
