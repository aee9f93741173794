use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

const CREATE_LABEL: &str = " + Create Task ";

/// Board name on the left, Create Task button on the right, separator below
pub fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title row
            Constraint::Length(1), // separator
        ])
        .split(area);
    let row = chunks[0];
    let bg = app.theme.background;

    let button_w = display_width(CREATE_LABEL) as u16;
    let button = if row.width > button_w + 2 {
        Some(Rect::new(row.right() - button_w - 1, row.y, button_w, 1))
    } else {
        None
    };

    let name_w = row
        .width
        .saturating_sub(button.map_or(0, |b| b.width + 2))
        .saturating_sub(1) as usize;
    let title = Line::from(vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            truncate_to_width(&app.board_name, name_w),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(title).style(Style::default().bg(bg)), row);

    if let Some(button) = button {
        let style = Style::default()
            .fg(app.theme.background)
            .bg(app.theme.highlight)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Paragraph::new(Span::styled(CREATE_LABEL, style)), button);
        app.hits.create_button = Some(button);
    }

    let separator = "\u{2500}".repeat(chunks[1].width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(
            separator,
            Style::default().fg(app.theme.dim).bg(bg),
        )),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::test_support::app_with;
    use crate::tui::render::test_helpers::render_to_string;

    #[test]
    fn shows_name_and_button() {
        let mut app = app_with(&[]);
        app.board_name = "Desktop & Mobile Application".into();
        let output = render_to_string(60, 2, |frame, area| {
            render_header(frame, &mut app, area);
        });
        let first = output.lines().next().unwrap();
        assert!(first.starts_with(" Desktop & Mobile Application"));
        assert!(first.ends_with("+ Create Task"));
        let button = app.hits.create_button.unwrap();
        assert_eq!(button.y, 0);
        assert_eq!(button.right(), 59);
    }

    #[test]
    fn narrow_terminal_drops_button() {
        let mut app = app_with(&[]);
        render_to_string(12, 2, |frame, area| {
            render_header(frame, &mut app, area);
        });
        assert_eq!(app.hits.create_button, None);
    }
}
