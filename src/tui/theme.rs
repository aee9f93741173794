use ratatui::style::Color;

use crate::model::{Priority, Status, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub selection_bg: Color,
    pub todo_header: Color,
    pub in_progress_header: Color,
    pub complete_header: Color,
    /// Card body once completed
    pub completed_card: Color,
    pub priority_high: Color,
    pub priority_medium: Color,
    pub priority_low: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            todo_header: Color::Rgb(0x5B, 0x21, 0xB6),
            in_progress_header: Color::Rgb(0xFD, 0xE0, 0x47),
            complete_header: Color::Rgb(0x16, 0xA3, 0x4A),
            completed_card: Color::Rgb(0xC6, 0xE9, 0xA7),
            priority_high: Color::Rgb(0xFF, 0x5C, 0x00),
            priority_medium: Color::Rgb(0xFF, 0x00, 0xB8),
            priority_low: Color::Rgb(0x8A, 0x8A, 0x8A),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the board's UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                log::warn!("event=theme_color_invalid key={} value={}", key, value);
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "selection_bg" => theme.selection_bg = color,
                "todo_header" => theme.todo_header = color,
                "in_progress_header" => theme.in_progress_header = color,
                "complete_header" => theme.complete_header = color,
                "completed_card" => theme.completed_card = color,
                "priority_high" => theme.priority_high = color,
                "priority_medium" => theme.priority_medium = color,
                "priority_low" => theme.priority_low = color,
                _ => log::debug!("event=theme_key_unknown key={}", key),
            }
        }

        theme
    }

    /// Column header color
    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Todo => self.todo_header,
            Status::InProgress => self.in_progress_header,
            Status::Complete => self.complete_header,
        }
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.priority_high,
            Priority::Medium => self.priority_medium,
            Priority::Low => self.priority_low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF5C00"),
            Some(Color::Rgb(0xFF, 0x5C, 0x00))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
    }

    #[test]
    fn test_priority_colors() {
        let theme = Theme::default();
        assert_eq!(
            theme.priority_color(Priority::High),
            Color::Rgb(0xFF, 0x5C, 0x00)
        );
        assert_eq!(
            theme.priority_color(Priority::Medium),
            Color::Rgb(0xFF, 0x00, 0xB8)
        );
        assert_eq!(
            theme.priority_color(Priority::Low),
            Color::Rgb(0x8A, 0x8A, 0x8A)
        );
    }

    #[test]
    fn test_status_colors() {
        let theme = Theme::default();
        assert_eq!(
            theme.status_color(Status::Todo),
            Color::Rgb(0x5B, 0x21, 0xB6)
        );
        assert_eq!(
            theme.status_color(Status::InProgress),
            Color::Rgb(0xFD, 0xE0, 0x47)
        );
        assert_eq!(
            theme.status_color(Status::Complete),
            Color::Rgb(0x16, 0xA3, 0x4A)
        );
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("completed_card".into(), "#112233".into());
        ui.colors.insert("text".into(), "not-a-color".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.completed_card, Color::Rgb(0x11, 0x22, 0x33));
        // Invalid values keep the default
        assert_eq!(theme.text, Color::Rgb(0xB0, 0xAA, 0xFF));
    }
}
