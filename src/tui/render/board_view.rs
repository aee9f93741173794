use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::model::{Status, TodoRecord};
use crate::tui::app::{App, CardHit, EditSession};
use crate::tui::card::{CardField, CardState};
use crate::util::unicode::{byte_offset_to_display_col, display_width, truncate_to_width};

use super::helpers::split_line;

/// Rows taken by one card, borders included
pub const CARD_HEIGHT: u16 = 6;

const DUE_PREFIX: &str = "Due ";

/// Render the three status columns and record card regions
pub fn render_board(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .spacing(1)
        .split(area);

    // Keep the focused card of each column in view
    let counts = {
        let board = app.board();
        Status::ALL.map(|s| board.count(s))
    };
    for (i, column) in columns.iter().enumerate() {
        let visible = (column.height.saturating_sub(2) / CARD_HEIGHT).max(1) as usize;
        let row = app.rows[i];
        let scroll = &mut app.scroll[i];
        if row < *scroll {
            *scroll = row;
        } else if row >= *scroll + visible {
            *scroll = row + 1 - visible;
        }
        *scroll = (*scroll).min(counts[i].saturating_sub(1));
    }

    let app_ref: &App = app;
    let board = app_ref.board();
    let mut hits = Vec::new();
    for status in Status::ALL {
        let column = columns[status.index()];
        let records = board.column(status);
        let inner = render_column_frame(frame, app_ref, status, records.len(), column);

        if records.is_empty() {
            let placeholder = Paragraph::new(Span::styled(
                "No todos",
                Style::default().fg(app_ref.theme.dim).bg(app_ref.theme.background),
            ))
            .alignment(Alignment::Center);
            if inner.height > 1 {
                frame.render_widget(placeholder, Rect { y: inner.y + 1, height: 1, ..inner });
            }
            continue;
        }

        let scroll = app_ref.scroll[status.index()];
        let focused_row = (app_ref.column == status).then(|| app_ref.row(status));
        let mut y = inner.y;
        for (row, record) in records.iter().enumerate().skip(scroll) {
            if y + CARD_HEIGHT > inner.bottom() {
                break;
            }
            let card_area = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
            hits.push(render_card(
                frame,
                app_ref,
                record,
                card_area,
                focused_row == Some(row),
            ));
            y += CARD_HEIGHT;
        }
    }

    app.hits.cards = hits;
}

/// Bordered column with a coloured heading. Returns the inner area.
fn render_column_frame(
    frame: &mut Frame,
    app: &App,
    status: Status,
    count: usize,
    area: Rect,
) -> Rect {
    let bg = app.theme.background;
    let focused = app.column == status;
    let heading_style = Style::default()
        .fg(bg)
        .bg(app.theme.status_color(status))
        .add_modifier(Modifier::BOLD);
    let title = Line::from(vec![
        Span::styled(format!(" {} ", status.heading()), heading_style),
        Span::styled(format!(" {} ", count), Style::default().fg(app.theme.dim).bg(bg)),
    ]);
    let border = if focused {
        app.theme.status_color(status)
    } else {
        app.theme.dim
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border).bg(bg))
        .title(title)
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Draw one card and return its clickable regions
fn render_card(
    frame: &mut Frame,
    app: &App,
    record: &TodoRecord,
    area: Rect,
    focused: bool,
) -> CardHit {
    let theme = &app.theme;
    let seeded;
    let state = match app.cards.get(&record.id) {
        Some(card) => card,
        None => {
            seeded = CardState::seed(record);
            &seeded
        }
    };
    let editing = app.editing.as_ref().filter(|e| e.id == record.id);

    let completed = record.completed;
    let (fg, bg) = if completed {
        (theme.background, theme.completed_card)
    } else if focused {
        (theme.text, theme.selection_bg)
    } else {
        (theme.text, theme.background)
    };
    let base = Style::default().fg(fg).bg(bg);
    let border = if focused { theme.highlight } else { theme.dim };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border).bg(theme.background))
        .style(base);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;

    // Priority badge and status button
    let badge_text = format!(" {} ", state.priority);
    let badge_style = Style::default()
        .fg(theme.background)
        .bg(theme.priority_color(state.priority))
        .add_modifier(Modifier::BOLD);
    let status_text = format!(" {} \u{25BC} ", state.status.as_str());
    let status_style = if completed {
        base.add_modifier(Modifier::DIM)
    } else {
        Style::default()
            .fg(theme.text_bright)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD)
    };
    let badge_w = (display_width(&badge_text) as u16).min(inner.width);
    let status_w = display_width(&status_text) as u16;
    let priority_button = Rect::new(inner.x, inner.y, badge_w, inner.height.min(1));
    let status_button = if inner.width >= badge_w + status_w + 1 {
        Rect::new(inner.right() - status_w, inner.y, status_w, inner.height.min(1))
    } else {
        Rect::new(inner.right(), inner.y, 0, 0)
    };

    let mut lines = vec![split_line(
        vec![Span::styled(badge_text, badge_style)],
        vec![Span::styled(status_text, status_style)],
        width,
        base,
    )];

    let field_style = |field: CardField| match editing {
        Some(e) if e.field == field => base.add_modifier(Modifier::UNDERLINED),
        _ => base,
    };

    let mut title_style = field_style(CardField::Title).add_modifier(Modifier::BOLD);
    if completed {
        title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
    }
    lines.push(Line::from(Span::styled(
        truncate_to_width(&state.title, width),
        title_style,
    )));

    lines.push(Line::from(Span::styled(
        truncate_to_width(&state.description, width),
        if completed {
            field_style(CardField::Description)
        } else {
            field_style(CardField::Description).fg(theme.dim)
        },
    )));

    let due = if state.date.is_empty() && editing.is_none() {
        Span::styled("No due date", base.fg(if completed { fg } else { theme.dim }))
    } else {
        Span::styled(
            format!("{}{}", DUE_PREFIX, state.date),
            field_style(CardField::Date),
        )
    };
    let done = if completed {
        vec![Span::styled(
            "\u{2713} Done",
            base.add_modifier(Modifier::BOLD),
        )]
    } else {
        vec![]
    };
    lines.push(split_line(vec![due], done, width, base));

    frame.render_widget(Paragraph::new(lines).style(base), inner);

    if let Some(session) = editing {
        place_cursor(frame, state, session, inner);
    }

    CardHit {
        id: record.id.clone(),
        area,
        priority_button,
        status_button,
    }
}

fn place_cursor(frame: &mut Frame, state: &CardState, session: &EditSession, inner: Rect) {
    let (row, prefix) = match session.field {
        CardField::Title => (1, 0),
        CardField::Description => (2, 0),
        CardField::Date => (3, display_width(DUE_PREFIX)),
    };
    if row >= inner.height {
        return;
    }
    let col = prefix + byte_offset_to_display_col(state.field(session.field), session.cursor);
    let x = inner.x + (col as u16).min(inner.width.saturating_sub(1));
    frame.set_cursor_position(Position::new(x, inner.y + row));
}
