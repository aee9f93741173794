use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::form::FormField;
use crate::util::unicode::{byte_offset_to_display_col, display_width, truncate_to_width};

use super::helpers::centered_rect_fixed;

const LABEL_WIDTH: usize = 14;

/// Render the task creation modal
pub fn render_form_modal(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let form = &app.form;
    let bg = theme.background;

    let width = area.width.saturating_sub(2).min(60);
    let height = area.height.saturating_sub(2).min(12);
    let popup = centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .title(Span::styled(
            " New Task ",
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let value_w = (inner.width as usize).saturating_sub(LABEL_WIDTH + 1);
    let text_style = Style::default().fg(theme.text).bg(bg);
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let mut lines: Vec<Line> = vec![Line::from("")];
    let mut cursor: Option<Position> = None;
    for field in FormField::ALL {
        let focused = form.focus == field;
        let label_style = if focused {
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            text_style
        };
        let mut spans = vec![Span::styled(
            format!(" {:<width$}", field.label(), width = LABEL_WIDTH - 1),
            label_style,
        )];

        match form.text(field) {
            Some(text) => {
                let value_style = if focused {
                    Style::default().fg(theme.text_bright).bg(theme.selection_bg)
                } else {
                    Style::default().fg(theme.text_bright).bg(bg)
                };
                if text.is_empty() && field == FormField::Date && !focused {
                    spans.push(Span::styled("YYYY-MM-DD", dim_style));
                } else {
                    let shown = truncate_to_width(text, value_w);
                    let pad = value_w.saturating_sub(display_width(&shown));
                    spans.push(Span::styled(format!("{}{}", shown, " ".repeat(pad)), value_style));
                }
                if focused {
                    let col = byte_offset_to_display_col(text, form.cursor).min(value_w.saturating_sub(1));
                    cursor = Some(Position::new(
                        inner.x + (LABEL_WIDTH + col) as u16,
                        inner.y + lines.len() as u16,
                    ));
                }
            }
            None => {
                let (value, fg) = match field {
                    FormField::Status => (form.status.as_str(), theme.status_color(form.status)),
                    _ => (form.priority.as_str(), theme.priority_color(form.priority)),
                };
                let arrow_style = if focused { label_style } else { dim_style };
                spans.push(Span::styled("\u{25C0} ", arrow_style));
                spans.push(Span::styled(
                    value,
                    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(" \u{25B6}", arrow_style));
            }
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    match &form.error {
        Some(err) => lines.push(Line::from(Span::styled(
            format!(" {}", err),
            Style::default().fg(theme.red).bg(bg),
        ))),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(vec![
        Span::styled(" Tab", Style::default().fg(theme.highlight).bg(bg)),
        Span::styled(" next  ", dim_style),
        Span::styled("\u{2190}\u{2192}", Style::default().fg(theme.highlight).bg(bg)),
        Span::styled(" change  ", dim_style),
        Span::styled("Enter", Style::default().fg(theme.highlight).bg(bg)),
        Span::styled(" create  ", dim_style),
        Span::styled("Esc", Style::default().fg(theme.highlight).bg(bg)),
        Span::styled(" cancel", dim_style),
    ]));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
    if let Some(pos) = cursor
        && pos.y < inner.bottom()
    {
        frame.set_cursor_position(pos);
    }
    app.hits.form = Some(popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::test_support::app_with;
    use crate::tui::render::test_helpers::render_app;

    #[test]
    fn modal_lists_fields_and_defaults() {
        let mut app = app_with(&[]);
        app.open_form();
        let output = render_app(&mut app);
        assert!(output.contains("New Task"));
        for field in FormField::ALL {
            assert!(output.contains(field.label()), "missing {}", field.label());
        }
        assert!(output.contains("\u{25C0} Todo \u{25B6}"));
        assert!(output.contains("\u{25C0} Low \u{25B6}"));
        assert!(output.contains("YYYY-MM-DD"));
        assert!(app.hits.form.is_some());
    }

    #[test]
    fn modal_shows_typed_text_and_error() {
        let mut app = app_with(&[]);
        app.open_form();
        app.form.title = "Plan sprint".into();
        app.form.date = "next week".into();
        app.submit_form();
        let output = render_app(&mut app);
        assert!(output.contains("Plan sprint"));
        assert!(output.contains("invalid due date \"next week\""));
    }

    #[test]
    fn hidden_form_records_no_region() {
        let mut app = app_with(&[]);
        render_app(&mut app);
        assert!(app.hits.form.is_none());
    }
}
