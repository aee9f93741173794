use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_rect;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Board",
        &[
            ("\u{2190}\u{2192}/hl", "Switch column"),
            ("\u{2191}\u{2193}/jk", "Move between cards"),
            ("1 2 3", "Jump to column"),
            ("g/G", "First / last card"),
            ("n", "Create task"),
            ("?", "Toggle help"),
            ("q", "Quit"),
        ],
    ),
    (
        "Card",
        &[
            ("p", "Priority picker"),
            ("s", "Status picker"),
            ("Enter/e", "Edit title, description, due date"),
            ("x", "Toggle completed"),
            ("D/Del", "Delete (not while completed)"),
        ],
    ),
    (
        "Editing",
        &[
            ("Tab", "Next field"),
            ("Enter", "Save changes"),
            ("Esc", "Discard changes"),
        ],
    ),
    (
        "Pickers",
        &[
            ("j/k", "Move"),
            ("Enter/1-3", "Select"),
            ("Esc", "Close"),
        ],
    ),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    for (section, bindings) in BINDINGS {
        lines.push(Line::from(Span::styled(format!(" {}", section), header_style)));
        for &(key, desc) in *bindings {
            add_binding(&mut lines, key, desc, key_style, desc_style);
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        " Mouse: click badges, buttons and Create Task",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 14;
    let padded_key = format!("   {:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
