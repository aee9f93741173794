use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::model::TodoId;
use crate::tui::app::{App, Mode};
use crate::tui::card::Picker;

/// Handle a mouse event against the regions recorded by the last render
pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            pointer_down(app, Position::new(event.column, event.row));
        }
        MouseEventKind::ScrollDown => scroll(app, 1),
        MouseEventKind::ScrollUp => scroll(app, -1),
        _ => {}
    }
}

fn pointer_down(app: &mut App, pos: Position) {
    app.status_message = None;
    if app.show_help {
        app.show_help = false;
        return;
    }
    if app.show_form {
        // Clicks outside the modal are ignored
        return;
    }

    // An option row of an open picker
    let option = app.hits.pickers.iter().find_map(|p| {
        p.options
            .iter()
            .position(|r| r.contains(pos))
            .map(|index| (p.id.clone(), p.picker, index))
    });
    if let Some((id, picker, index)) = option {
        app.select_option(&id, picker, index);
        close_outside(app, pos);
        return;
    }

    // Every other picker closes unless the pointer is inside its own region
    close_outside(app, pos);

    if app.hits.create_button.is_some_and(|r| r.contains(pos)) {
        app.open_form();
        return;
    }

    let Some(hit) = app.hits.cards.iter().find(|c| c.area.contains(pos)).cloned() else {
        return;
    };
    if app.mode == Mode::Edit && app.editing.as_ref().is_some_and(|e| e.id != hit.id) {
        app.commit_edit();
    }
    app.focus(&hit.id);
    if hit.priority_button.contains(pos) {
        app.toggle_picker_on(&hit.id, Picker::Priority);
    } else if hit.status_button.contains(pos) {
        app.toggle_picker_on(&hit.id, Picker::Status);
    }
}

fn close_outside(app: &mut App, pos: Position) {
    let open: Vec<TodoId> = app
        .cards
        .iter()
        .filter(|(_, c)| c.priority_open || c.status_open)
        .map(|(id, _)| id.clone())
        .collect();
    for id in open {
        let inside_priority = app.hits.inside_picker(&id, Picker::Priority, pos);
        let inside_status = app.hits.inside_picker(&id, Picker::Status, pos);
        if let Some(card) = app.cards.get_mut(&id) {
            card.pointer_down(inside_priority, inside_status);
        }
    }
}

fn scroll(app: &mut App, delta: isize) {
    if app.show_form || app.show_help {
        return;
    }
    let count = app.board().count(app.column);
    let row = &mut app.rows[app.column.index()];
    *row = (*row as isize + delta).clamp(0, count.saturating_sub(1) as isize) as usize;
}
