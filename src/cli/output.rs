use serde::Serialize;

use crate::model::{Status, TodoRecord, format_due_date};
use crate::ops::projection::Board;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<Vec<&'a TodoRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_progress: Option<Vec<&'a TodoRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<Vec<&'a TodoRecord>>,
}

impl<'a> BoardJson<'a> {
    /// All three columns, or just `only` when a filter is given
    pub fn from_board(board: &Board<'a>, only: Option<Status>) -> Self {
        let column = |status: Status| {
            only.is_none_or(|s| s == status)
                .then(|| board.column(status).to_vec())
        };
        BoardJson {
            todo: column(Status::Todo),
            in_progress: column(Status::InProgress),
            complete: column(Status::Complete),
        }
    }
}

#[derive(Serialize)]
pub struct DeletedJson<'a> {
    pub deleted: &'a str,
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One line per card: short id, priority, title, due date
pub fn format_record_line(record: &TodoRecord) -> String {
    let mut line = format!(
        "{:<8}  {:<8} {}",
        record.id.short(),
        format!("[{}]", record.priority),
        record.title
    );
    if record.date.is_some() {
        line.push_str(&format!("  due {}", format_due_date(record.date)));
    }
    if record.completed {
        line.push_str("  \u{2713}");
    }
    line
}

/// The board as text, one section per column
pub fn format_board(board: &Board, only: Option<Status>) -> Vec<String> {
    let mut lines = Vec::new();
    for status in Status::ALL {
        if only.is_some_and(|s| s != status) {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let column = board.column(status);
        lines.push(format!("{} ({})", status.heading(), column.len()));
        if column.is_empty() {
            lines.push("  No todos".to_string());
        }
        for record in column {
            lines.push(format!("  {}", format_record_line(record)));
        }
    }
    lines
}

/// Every field of one todo
pub fn format_record_detail(record: &TodoRecord) -> Vec<String> {
    let mut lines = vec![
        format!("id:          {}", record.id),
        format!("title:       {}", record.title),
        format!("status:      {}", record.status),
        format!("priority:    {}", record.priority),
        format!(
            "due:         {}",
            if record.date.is_some() {
                format_due_date(record.date)
            } else {
                "-".to_string()
            }
        ),
        format!("completed:   {}", if record.completed { "yes" } else { "no" }),
        format!("created:     {}", record.created_at.format("%Y-%m-%d %H:%M:%S UTC")),
    ];
    if !record.description.is_empty() {
        lines.push(String::new());
        for line in record.description.lines() {
            lines.push(format!("  {}", line));
        }
    }
    lines
}
