use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::split_line;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let mut left: Vec<Span> = Vec::new();
    if let Some(msg) = &app.status_message {
        let fg = if msg.is_error {
            app.theme.red
        } else {
            app.theme.text_bright
        };
        left.push(Span::styled(format!(" {}", msg.text), Style::default().fg(fg).bg(bg)));
    } else if app.mode == Mode::Edit {
        let field = app.editing.as_ref().map_or("", |e| e.field.label());
        left.push(Span::styled(
            " -- EDIT -- ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
        left.push(Span::styled(field, dim));
    } else {
        let total = app.store.records().len();
        left.push(Span::styled(
            format!(" {} todo{}", total, if total == 1 { "" } else { "s" }),
            dim,
        ));
    }

    let hint = if !app.show_key_hints {
        ""
    } else if app.show_help {
        "? close help"
    } else if app.show_form {
        "Tab next  Enter create  Esc cancel"
    } else if app.mode == Mode::Edit {
        "Tab next field  Enter save  Esc cancel"
    } else if app.active_picker().is_some() {
        "j/k choose  Enter select  Esc close"
    } else {
        "n new  e edit  p priority  s status  x done  D delete  ? help  q quit"
    };
    let right = vec![Span::styled(format!("{} ", hint), dim)];

    let line = split_line(left, right, width, Style::default().bg(bg));
    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::tui::card::Picker;
    use crate::tui::input::test_support::app_with;
    use crate::tui::render::test_helpers::render_to_string;

    fn status_text(app: &App) -> String {
        render_to_string(100, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn navigate_shows_count_and_hints() {
        let app = app_with(&[("a", Status::Todo), ("b", Status::Todo)]);
        let output = status_text(&app);
        assert!(output.starts_with(" 2 todos"));
        assert!(output.contains("? help"));
    }

    #[test]
    fn message_replaces_count() {
        let mut app = app_with(&[("a", Status::Todo)]);
        app.set_error("create failed: disk full");
        assert!(status_text(&app).starts_with(" create failed: disk full"));
    }

    #[test]
    fn mode_specific_hints() {
        let mut app = app_with(&[("a", Status::Todo)]);
        app.toggle_picker(Picker::Status);
        assert!(status_text(&app).contains("Enter select"));

        app.close_all_pickers();
        app.begin_edit();
        let output = status_text(&app);
        assert!(output.contains("-- EDIT -- title"));
        assert!(output.contains("Enter save"));
    }

    #[test]
    fn hints_can_be_disabled() {
        let mut app = app_with(&[]);
        app.show_key_hints = false;
        assert_eq!(status_text(&app), " 0 todos");
    }
}
