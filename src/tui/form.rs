//! Task creation form shown in the modal.

use crate::model::{Priority, Status, TodoFields, parse_due_date};

/// Focusable form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Date,
    Status,
    Priority,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Date,
        FormField::Status,
        FormField::Priority,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Date => "Due date",
            FormField::Status => "Status",
            FormField::Priority => "Priority",
        }
    }

    /// Status and priority are cycled, not typed
    pub fn is_choice(self) -> bool {
        matches!(self, FormField::Status | FormField::Priority)
    }

    fn position(self) -> usize {
        FormField::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("invalid due date \"{0}\" (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub date: String,
    pub status: Status,
    pub priority: Priority,
    pub focus: FormField,
    /// Byte offset into the focused text field
    pub cursor: usize,
    pub error: Option<FormError>,
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm {
            title: String::new(),
            description: String::new(),
            date: String::new(),
            status: Status::Todo,
            priority: Priority::Low,
            focus: FormField::Title,
            cursor: 0,
            error: None,
        }
    }
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Description => Some(&self.description),
            FormField::Date => Some(&self.date),
            FormField::Status | FormField::Priority => None,
        }
    }

    /// Buffer and cursor of the focused text field
    pub fn focused_text_mut(&mut self) -> Option<(&mut String, &mut usize)> {
        let buffer = match self.focus {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::Date => &mut self.date,
            FormField::Status | FormField::Priority => return None,
        };
        Some((buffer, &mut self.cursor))
    }

    pub fn focus_next(&mut self) {
        let next = (self.focus.position() + 1) % FormField::ALL.len();
        self.set_focus(FormField::ALL[next]);
    }

    pub fn focus_prev(&mut self) {
        let len = FormField::ALL.len();
        let prev = (self.focus.position() + len - 1) % len;
        self.set_focus(FormField::ALL[prev]);
    }

    /// Move focus, placing the cursor at the end of the field's text
    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
        self.cursor = self.text(field).map_or(0, str::len);
    }

    /// Step the focused choice field forward or back. No-op on text fields.
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.focus {
            FormField::Status => {
                self.status = step(&Status::ALL, self.status.index(), forward);
            }
            FormField::Priority => {
                self.priority = step(&Priority::ALL, self.priority.index(), forward);
            }
            _ => {}
        }
    }

    /// Validate and produce the fields for a new todo. On error the form
    /// keeps its contents.
    pub fn submit(&self) -> Result<TodoFields, FormError> {
        let date =
            parse_due_date(&self.date).map_err(|_| FormError::InvalidDate(self.date.clone()))?;
        Ok(TodoFields {
            title: self.title.clone(),
            description: self.description.clone(),
            date,
            status: self.status,
            priority: self.priority,
        })
    }
}

fn step<T: Copy>(all: &[T], current: usize, forward: bool) -> T {
    let len = all.len();
    let next = if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    };
    all[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let form = TaskForm::new();
        assert_eq!(form.status, Status::Todo);
        assert_eq!(form.priority, Priority::Low);
        assert_eq!(form.focus, FormField::Title);
        assert_eq!(form.submit().unwrap(), TodoFields::default());
    }

    #[test]
    fn submit_collects_fields() {
        let form = TaskForm {
            title: "Ship".into(),
            description: "v1".into(),
            date: "2025-09-01".into(),
            status: Status::InProgress,
            priority: Priority::High,
            ..TaskForm::new()
        };
        assert_eq!(
            form.submit().unwrap(),
            TodoFields {
                title: "Ship".into(),
                description: "v1".into(),
                date: NaiveDate::from_ymd_opt(2025, 9, 1),
                status: Status::InProgress,
                priority: Priority::High,
            }
        );
    }

    #[test]
    fn submit_rejects_bad_date() {
        let form = TaskForm {
            date: "09/01/2025".into(),
            ..TaskForm::new()
        };
        assert_eq!(
            form.submit(),
            Err(FormError::InvalidDate("09/01/2025".into()))
        );
    }

    #[test]
    fn focus_cycles_and_places_cursor_at_end() {
        let mut form = TaskForm {
            description: "abc".into(),
            ..TaskForm::new()
        };
        form.focus_next();
        assert_eq!(form.focus, FormField::Description);
        assert_eq!(form.cursor, 3);

        form.focus_prev();
        form.focus_prev();
        assert_eq!(form.focus, FormField::Priority);
        assert!(form.focused_text_mut().is_none());
        form.focus_next();
        assert_eq!(form.focus, FormField::Title);
    }

    #[test]
    fn choices_wrap_both_ways() {
        let mut form = TaskForm::new();
        form.set_focus(FormField::Status);
        form.cycle_choice(false);
        assert_eq!(form.status, Status::Complete);
        form.cycle_choice(true);
        assert_eq!(form.status, Status::Todo);

        form.set_focus(FormField::Priority);
        form.cycle_choice(true);
        form.cycle_choice(true);
        assert_eq!(form.priority, Priority::High);

        // Text fields ignore cycling
        form.set_focus(FormField::Title);
        form.cycle_choice(true);
        assert_eq!(form.priority, Priority::High);
        assert_eq!(form.status, Status::Todo);
    }
}
