use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::model::Priority;
use crate::tui::app::{App, CardHit, PickerHit};
use crate::tui::card::{CardState, Picker};
use crate::util::unicode::display_width;

/// Draw a popup for every open picker on a visible card
pub fn render_pickers(frame: &mut Frame, app: &mut App, area: Rect) {
    let app_ref: &App = app;
    let mut hits = Vec::new();
    for hit in &app_ref.hits.cards {
        let Some(card) = app_ref.cards.get(&hit.id) else {
            continue;
        };
        for picker in [Picker::Priority, Picker::Status] {
            if card.is_open(picker) {
                hits.push(render_picker(frame, app_ref, card, hit, picker, area));
            }
        }
    }
    app.hits.pickers = hits;
}

fn render_picker(
    frame: &mut Frame,
    app: &App,
    card: &CardState,
    hit: &CardHit,
    picker: Picker,
    area: Rect,
) -> PickerHit {
    let theme = &app.theme;
    let bg = theme.background;
    let options = picker.options();
    let current = match picker {
        Picker::Priority => card.priority.index(),
        Picker::Status => card.status.index(),
    };
    // Keyboard cursor only applies to the focused card
    let cursor = if app.focused_id().as_ref() == Some(&hit.id) {
        app.picker_cursor
    } else {
        current
    };

    let label_w = options.iter().map(|o| display_width(o)).max().unwrap_or(0);
    // border + marker + space + label + space + border
    let width = (label_w as u16 + 5).min(area.width);
    let height = (options.len() as u16 + 2).min(area.height);
    let anchor = match picker {
        Picker::Priority => hit.priority_button,
        Picker::Status => hit.status_button,
    };
    let x = anchor.x.min(area.right().saturating_sub(width));
    let below = anchor.y + 1;
    let y = if below + height <= area.bottom() {
        below
    } else {
        anchor.y.saturating_sub(height).max(area.y)
    };
    let popup = Rect::new(x, y, width, height);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = Vec::with_capacity(options.len());
    let mut option_rects = Vec::with_capacity(options.len());
    for (i, label) in options.iter().enumerate() {
        let row_bg = if i == cursor { theme.selection_bg } else { bg };
        let fg = match picker {
            Picker::Priority => theme.priority_color(Priority::ALL[i]),
            Picker::Status => theme.text_bright,
        };
        let mut style = Style::default().fg(fg).bg(row_bg);
        if i == current {
            style = style.add_modifier(Modifier::BOLD);
        }
        let marker = if i == current { "\u{25CF}" } else { " " };
        let pad = label_w.saturating_sub(display_width(label));
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.highlight).bg(row_bg)),
            Span::styled(" ", Style::default().bg(row_bg)),
            Span::styled(format!("{}{} ", label, " ".repeat(pad)), style),
        ]));
        let row = inner.y + i as u16;
        if row < inner.bottom() {
            option_rects.push(Rect::new(inner.x, row, inner.width, 1));
        }
    }
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);

    PickerHit {
        id: hit.id.clone(),
        picker,
        popup,
        options: option_rects,
    }
}
