use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Status;
use crate::tui::app::App;
use crate::tui::card::Picker;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('n') => app.open_form(),

        KeyCode::Char('h') | KeyCode::Left => move_column(app, -1),
        KeyCode::Char('l') | KeyCode::Right => move_column(app, 1),
        KeyCode::Char('j') | KeyCode::Down => move_row(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_row(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.rows[app.column.index()] = 0,
        KeyCode::Char('G') | KeyCode::End => {
            let count = app.board().count(app.column);
            app.rows[app.column.index()] = count.saturating_sub(1);
        }
        KeyCode::Char(c @ '1'..='3') => {
            if let Some(status) = Status::from_index(c as usize - '1' as usize) {
                app.column = status;
            }
        }

        KeyCode::Char('p') => app.toggle_picker(Picker::Priority),
        KeyCode::Char('s') => app.toggle_picker(Picker::Status),
        KeyCode::Enter | KeyCode::Char('e') => app.begin_edit(),
        KeyCode::Char('x') | KeyCode::Char(' ') => app.request_toggle(),
        KeyCode::Char('D') | KeyCode::Delete => app.request_delete(),
        _ => {}
    }
}

fn move_column(app: &mut App, delta: isize) {
    let len = Status::ALL.len() as isize;
    let next = (app.column.index() as isize + delta).clamp(0, len - 1);
    if let Some(status) = Status::from_index(next as usize) {
        app.column = status;
    }
}

fn move_row(app: &mut App, delta: isize) {
    let count = app.board().count(app.column);
    if count == 0 {
        return;
    }
    let row = &mut app.rows[app.column.index()];
    *row = (*row as isize + delta).clamp(0, count as isize - 1) as usize;
}

#[cfg(test)]
mod tests {
    use super::super::handle_key;
    use super::super::test_support::{app_with, ch, key};
    use crossterm::event::KeyCode;

    use crate::model::Status;
    use crate::tui::app::Mode;
    use crate::tui::card::Picker;

    #[test]
    fn columns_and_rows() {
        let mut app = app_with(&[
            ("t1", Status::Todo),
            ("t2", Status::Todo),
            ("p1", Status::InProgress),
        ]);
        assert_eq!(app.focused_record().unwrap().title, "t2");
        handle_key(&mut app, ch('j'));
        assert_eq!(app.focused_record().unwrap().title, "t1");
        handle_key(&mut app, ch('j'));
        assert_eq!(app.focused_record().unwrap().title, "t1");

        handle_key(&mut app, ch('l'));
        assert_eq!(app.column, Status::InProgress);
        handle_key(&mut app, key(KeyCode::Right));
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.column, Status::Complete);
        assert!(app.focused_record().is_none());

        handle_key(&mut app, ch('1'));
        assert_eq!(app.column, Status::Todo);
        // Row is remembered per column
        assert_eq!(app.focused_record().unwrap().title, "t1");
    }

    #[test]
    fn n_opens_form_and_q_quits() {
        let mut app = app_with(&[]);
        handle_key(&mut app, ch('n'));
        assert!(app.show_form);
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.show_form);
        handle_key(&mut app, ch('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn pickers_and_edit_from_keys() {
        let mut app = app_with(&[("a", Status::Todo)]);
        handle_key(&mut app, ch('p'));
        assert_eq!(app.active_picker().map(|(_, p)| p), Some(Picker::Priority));
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.active_picker(), None);

        handle_key(&mut app, ch('e'));
        assert_eq!(app.mode, Mode::Edit);
    }

    #[test]
    fn toggle_then_delete_is_refused() {
        let mut app = app_with(&[("a", Status::Todo)]);
        handle_key(&mut app, ch('x'));
        assert!(app.focused_record().unwrap().completed);
        handle_key(&mut app, ch('D'));
        assert_eq!(app.store.records().len(), 1);
        assert!(app.status_message.as_ref().unwrap().is_error);

        handle_key(&mut app, ch('x'));
        handle_key(&mut app, key(KeyCode::Delete));
        assert!(app.store.records().is_empty());
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = app_with(&[("a", Status::Todo)]);
        handle_key(&mut app, ch('?'));
        assert!(app.show_help);
        handle_key(&mut app, ch('x'));
        assert!(!app.focused_record().unwrap().completed);
        handle_key(&mut app, ch('?'));
        assert!(!app.show_help);
    }
}
