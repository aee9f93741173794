use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left};

/// Apply a single-line editing key to `buffer`. Returns true if the key was
/// consumed (text or cursor changed).
pub(super) fn edit_line(buffer: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    *cursor = (*cursor).min(buffer.len());
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('a') if ctrl => *cursor = 0,
        KeyCode::Char('e') if ctrl => *cursor = buffer.len(),
        KeyCode::Char('u') if ctrl => {
            buffer.replace_range(..*cursor, "");
            *cursor = 0;
        }
        KeyCode::Char('w') if ctrl => {
            let start = word_boundary_left(buffer, *cursor);
            buffer.replace_range(start..*cursor, "");
            *cursor = start;
        }
        KeyCode::Char(_) if ctrl => return false,
        KeyCode::Char(c) => {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            let Some(prev) = prev_grapheme_boundary(buffer, *cursor) else {
                return false;
            };
            buffer.replace_range(prev..*cursor, "");
            *cursor = prev;
        }
        KeyCode::Delete => {
            let Some(next) = next_grapheme_boundary(buffer, *cursor) else {
                return false;
            };
            buffer.replace_range(*cursor..next, "");
        }
        KeyCode::Left => {
            if let Some(prev) = prev_grapheme_boundary(buffer, *cursor) {
                *cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_grapheme_boundary(buffer, *cursor) {
                *cursor = next;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buffer.len(),
        _ => return false,
    }
    true
}
