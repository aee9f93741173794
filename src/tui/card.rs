//! Per-card edit and picker state.
//!
//! A card keeps dirty copies of its record's fields and two picker flags.
//! Transitions never touch the store directly; they return a `CardAction`
//! for the shell to apply. Every transition takes the backing record so the
//! completion lock is read from the store, not from the dirty copy.

use crate::model::{Priority, Status, TodoId, TodoRecord, format_due_date, parse_due_date};

/// The two dropdowns on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Picker {
    Priority,
    Status,
}

impl Picker {
    /// Option labels, in display order
    pub fn options(self) -> [&'static str; 3] {
        match self {
            Picker::Priority => Priority::ALL.map(Priority::as_str),
            Picker::Status => Status::ALL.map(Status::as_str),
        }
    }

    pub fn option_count(self) -> usize {
        self.options().len()
    }
}

/// Free-text fields on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Title,
    Description,
    Date,
}

impl CardField {
    pub fn next(self) -> CardField {
        match self {
            CardField::Title => CardField::Description,
            CardField::Description => CardField::Date,
            CardField::Date => CardField::Title,
        }
    }

    pub fn prev(self) -> CardField {
        match self {
            CardField::Title => CardField::Date,
            CardField::Description => CardField::Title,
            CardField::Date => CardField::Description,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CardField::Title => "title",
            CardField::Description => "description",
            CardField::Date => "due date",
        }
    }
}

/// A store mutation requested by a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Update(TodoId, TodoRecord),
    Delete(TodoId),
    ToggleComplete(TodoId),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("invalid due date \"{0}\" (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardState {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    /// Due date as typed
    pub date: String,
    pub status: Status,
    pub priority: Priority,
    pub priority_open: bool,
    pub status_open: bool,
}

impl CardState {
    /// Seed local state from the record, pickers closed
    pub fn seed(record: &TodoRecord) -> Self {
        CardState {
            id: record.id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            date: format_due_date(record.date),
            status: record.status,
            priority: record.priority,
            priority_open: false,
            status_open: false,
        }
    }

    pub fn field(&self, field: CardField) -> &str {
        match field {
            CardField::Title => &self.title,
            CardField::Description => &self.description,
            CardField::Date => &self.date,
        }
    }

    fn field_mut(&mut self, field: CardField) -> &mut String {
        match field {
            CardField::Title => &mut self.title,
            CardField::Description => &mut self.description,
            CardField::Date => &mut self.date,
        }
    }

    /// Replace a field's dirty value. Refused (false) once completed.
    pub fn edit(&mut self, record: &TodoRecord, field: CardField, value: String) -> bool {
        if record.completed {
            return false;
        }
        *self.field_mut(field) = value;
        true
    }

    /// Whether any text field differs from the record
    pub fn is_dirty(&self, record: &TodoRecord) -> bool {
        self.title != record.title
            || self.description != record.description
            || self.date != format_due_date(record.date)
    }

    /// Persist dirty text fields. `Ok(None)` when nothing changed or the
    /// card is locked.
    pub fn commit(&mut self, record: &TodoRecord) -> Result<Option<CardAction>, CardError> {
        if record.completed {
            self.revert(record);
            return Ok(None);
        }
        let date =
            parse_due_date(&self.date).map_err(|_| CardError::InvalidDate(self.date.clone()))?;
        self.date = format_due_date(date);
        if !self.is_dirty(record) {
            return Ok(None);
        }
        let updated = TodoRecord {
            title: self.title.clone(),
            description: self.description.clone(),
            date,
            ..record.clone()
        };
        Ok(Some(CardAction::Update(record.id.clone(), updated)))
    }

    /// Throw away dirty text
    pub fn revert(&mut self, record: &TodoRecord) {
        self.title = record.title.clone();
        self.description = record.description.clone();
        self.date = format_due_date(record.date);
    }

    /// Open or close a picker. Refused (false) once completed.
    pub fn toggle_picker(&mut self, record: &TodoRecord, picker: Picker) -> bool {
        if record.completed {
            return false;
        }
        match picker {
            Picker::Priority => self.priority_open = !self.priority_open,
            Picker::Status => self.status_open = !self.status_open,
        }
        true
    }

    pub fn is_open(&self, picker: Picker) -> bool {
        match picker {
            Picker::Priority => self.priority_open,
            Picker::Status => self.status_open,
        }
    }

    /// The open picker that takes keyboard input (status wins if both are open)
    pub fn active_picker(&self) -> Option<Picker> {
        if self.status_open {
            Some(Picker::Status)
        } else if self.priority_open {
            Some(Picker::Priority)
        } else {
            None
        }
    }

    pub fn close_pickers(&mut self) {
        self.priority_open = false;
        self.status_open = false;
    }

    pub fn close(&mut self, picker: Picker) {
        match picker {
            Picker::Priority => self.priority_open = false,
            Picker::Status => self.status_open = false,
        }
    }

    /// Pick a priority: set it locally, close the picker, request an update
    /// of the backing record with only the priority changed.
    pub fn select_priority(&mut self, record: &TodoRecord, value: Priority) -> Option<CardAction> {
        self.priority_open = false;
        if record.completed {
            return None;
        }
        self.priority = value;
        let updated = TodoRecord {
            priority: value,
            ..record.clone()
        };
        Some(CardAction::Update(record.id.clone(), updated))
    }

    /// Pick a status: same shape as `select_priority`
    pub fn select_status(&mut self, record: &TodoRecord, value: Status) -> Option<CardAction> {
        self.status_open = false;
        if record.completed {
            return None;
        }
        self.status = value;
        let updated = TodoRecord {
            status: value,
            ..record.clone()
        };
        Some(CardAction::Update(record.id.clone(), updated))
    }

    /// Pointer pressed somewhere on screen. Each picker closes unless the
    /// pointer is inside its own region.
    pub fn pointer_down(&mut self, inside_priority: bool, inside_status: bool) {
        if !inside_priority {
            self.priority_open = false;
        }
        if !inside_status {
            self.status_open = false;
        }
    }

    /// Delete is disabled while completed
    pub fn request_delete(&self, record: &TodoRecord) -> Option<CardAction> {
        if record.completed {
            None
        } else {
            Some(CardAction::Delete(record.id.clone()))
        }
    }

    pub fn request_toggle(&self, record: &TodoRecord) -> CardAction {
        CardAction::ToggleComplete(record.id.clone())
    }

    /// Re-seed from the record after a store change. The field being edited
    /// keeps its dirty text. A status change moves the card to another
    /// column, which closes both pickers; so does completion.
    pub fn refresh(&mut self, record: &TodoRecord, editing: Option<CardField>) {
        if record.status != self.status || record.completed {
            self.close_pickers();
        }
        let keep = editing.map(|f| self.field(f).to_string());
        self.revert(record);
        if let (Some(field), Some(text)) = (editing, keep) {
            *self.field_mut(field) = text;
        }
        self.status = record.status;
        self.priority = record.priority;
    }
}
