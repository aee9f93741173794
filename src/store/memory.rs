use chrono::{DateTime, Utc};

use crate::model::{Backend, TodoFields, TodoId, TodoRecord};

use super::{TodoCollection, TodoStore};

/// Ephemeral store held for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: TodoCollection,
    clock: IdClock,
}

/// Hands out epoch-millisecond ids, bumping past the previous one when two
/// creates land in the same millisecond.
#[derive(Debug, Default)]
struct IdClock {
    last: i64,
}

impl IdClock {
    fn next(&mut self, now: DateTime<Utc>) -> TodoId {
        let millis = now.timestamp_millis();
        let next = if millis > self.last {
            millis
        } else {
            self.last + 1
        };
        self.last = next;
        TodoId::new(next.to_string())
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn create_at(&mut self, fields: TodoFields, now: DateTime<Utc>) -> TodoId {
        // Loop only matters if ids were seeded from elsewhere
        let mut id = self.clock.next(now);
        while self.records.contains(&id) {
            id = self.clock.next(now);
        }
        self.records
            .prepend(TodoRecord::new(id.clone(), fields, now));
        log::debug!("event=todo_create backend=memory id={}", id);
        id
    }
}

impl TodoStore for MemoryStore {
    fn backend(&self) -> Backend {
        Backend::Memory
    }

    fn records(&self) -> &TodoCollection {
        &self.records
    }

    fn create(&mut self, fields: TodoFields) -> Option<TodoId> {
        Some(self.create_at(fields, Utc::now()))
    }

    fn update(&mut self, id: &TodoId, record: TodoRecord) {
        if !self.records.replace(id, record) {
            log::debug!("event=todo_update status=skipped reason=not_found id={}", id);
        }
    }

    fn delete(&mut self, id: &TodoId) {
        match self.records.get(id).map(|r| r.completed) {
            None => {
                log::debug!("event=todo_delete status=skipped reason=not_found id={}", id);
            }
            Some(true) => {
                log::warn!("event=todo_delete status=blocked reason=completed id={}", id);
            }
            Some(false) => {
                self.records.remove(id);
            }
        }
    }

    fn toggle_complete(&mut self, id: &TodoId) {
        if !self.records.toggle_complete(id) {
            log::debug!("event=todo_toggle status=skipped reason=not_found id={}", id);
        }
    }
}
