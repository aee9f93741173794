use crossterm::event::{KeyCode, KeyEvent};

use crate::model::TodoId;
use crate::tui::app::App;
use crate::tui::card::Picker;

/// Keys while a picker on the focused card is open
pub(super) fn handle_picker(app: &mut App, id: &TodoId, picker: Picker, key: KeyEvent) {
    let last = picker.option_count() - 1;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.picker_cursor = (app.picker_cursor + 1).min(last);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.picker_cursor = app.picker_cursor.saturating_sub(1);
        }
        KeyCode::Char(c @ '1'..='3') => {
            let index = c as usize - '1' as usize;
            app.select_option(id, picker, index);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let index = app.picker_cursor.min(last);
            app.select_option(id, picker, index);
        }
        KeyCode::Char('p') if picker == Picker::Priority => app.toggle_picker(picker),
        KeyCode::Char('s') if picker == Picker::Status => app.toggle_picker(picker),
        KeyCode::Esc | KeyCode::Char('q') => {
            if let Some(card) = app.cards.get_mut(id) {
                card.close(picker);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::super::handle_key;
    use super::super::test_support::{app_with, ch, key};
    use crossterm::event::KeyCode;

    use crate::model::{Priority, Status};

    #[test]
    fn cursor_moves_and_enter_selects() {
        let mut app = app_with(&[("a", Status::Todo)]);
        let id = app.focused_id().unwrap();
        handle_key(&mut app, ch('p'));
        assert_eq!(app.picker_cursor, 0);
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, ch('j'));
        assert_eq!(app.picker_cursor, 2);
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.store.get(&id).unwrap().priority, Priority::High);
        assert_eq!(app.active_picker(), None);
    }

    #[test]
    fn number_selects_status_and_card_moves() {
        let mut app = app_with(&[("a", Status::Todo), ("b", Status::Todo)]);
        let id = app.focused_id().unwrap();
        handle_key(&mut app, ch('s'));
        handle_key(&mut app, ch('2'));

        let record = app.store.get(&id).unwrap();
        assert_eq!(record.status, Status::InProgress);
        assert_eq!(record.title, "b");
        assert_eq!(app.board().count(Status::Todo), 1);
        assert_eq!(app.column, Status::InProgress);
    }

    #[test]
    fn esc_and_same_key_close() {
        let mut app = app_with(&[("a", Status::Todo)]);
        handle_key(&mut app, ch('s'));
        handle_key(&mut app, ch('s'));
        assert_eq!(app.active_picker(), None);

        handle_key(&mut app, ch('s'));
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.active_picker(), None);
        assert!(!app.should_quit);
    }
}
