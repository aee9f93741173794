use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::text::edit_line;

/// Keys while editing a card's text
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(session) = app.editing.clone() else {
        app.mode = Mode::Navigate;
        return;
    };
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Tab => app.edit_field(session.field.next()),
        KeyCode::BackTab => app.edit_field(session.field.prev()),
        _ => {
            let (Some(record), Some(card)) = (
                app.store.get(&session.id),
                app.cards.get_mut(&session.id),
            ) else {
                return;
            };
            let mut buffer = card.field(session.field).to_string();
            let mut cursor = session.cursor;
            if edit_line(&mut buffer, &mut cursor, key)
                && card.edit(record, session.field, buffer)
                && let Some(s) = &mut app.editing
            {
                s.cursor = cursor;
            }
        }
    }
}
