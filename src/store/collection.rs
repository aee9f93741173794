use indexmap::IndexMap;

use crate::model::{TodoId, TodoRecord};

/// Ordered, versioned set of todos keyed by id.
///
/// Index 0 is the most recently created record. Every visible change bumps
/// `version`, which the shell uses to decide when to re-project.
#[derive(Debug, Clone, Default)]
pub struct TodoCollection {
    records: IndexMap<TodoId, TodoRecord>,
    version: u64,
}

impl TodoCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &TodoId) -> Option<&TodoRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &TodoId) -> bool {
        self.records.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TodoRecord> {
        self.records.values()
    }

    /// Insert at the front. Returns false (and changes nothing) if the id
    /// is already taken.
    pub fn prepend(&mut self, record: TodoRecord) -> bool {
        if self.records.contains_key(&record.id) {
            return false;
        }
        self.records.shift_insert(0, record.id.clone(), record);
        self.version += 1;
        true
    }

    /// Replace the record stored under `id`, keeping its position, id and
    /// creation time. No-op if `id` is absent.
    pub fn replace(&mut self, id: &TodoId, mut record: TodoRecord) -> bool {
        let Some(slot) = self.records.get_mut(id) else {
            return false;
        };
        record.id = slot.id.clone();
        record.created_at = slot.created_at;
        if *slot != record {
            *slot = record;
            self.version += 1;
        }
        true
    }

    /// Remove a record, preserving the order of the rest
    pub fn remove(&mut self, id: &TodoId) -> Option<TodoRecord> {
        let removed = self.records.shift_remove(id);
        if removed.is_some() {
            self.version += 1;
        }
        removed
    }

    /// Flip `completed` and nothing else
    pub fn toggle_complete(&mut self, id: &TodoId) -> bool {
        match self.records.get_mut(id) {
            Some(record) => {
                record.completed = !record.completed;
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Swap in a full snapshot. Duplicate ids keep their first occurrence.
    pub fn reset(&mut self, snapshot: Vec<TodoRecord>) {
        let mut records = IndexMap::with_capacity(snapshot.len());
        for record in snapshot {
            records.entry(record.id.clone()).or_insert(record);
        }
        // IndexMap equality ignores order, so compare entry by entry
        if !records.iter().eq(self.records.iter()) {
            self.records = records;
            self.version += 1;
        }
    }

    pub fn to_vec(&self) -> Vec<TodoRecord> {
        self.records.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status, TodoFields};
    use chrono::{TimeZone, Utc};

    fn record(id: &str, title: &str) -> TodoRecord {
        TodoRecord::new(
            TodoId::new(id),
            TodoFields {
                title: title.into(),
                ..Default::default()
            },
            Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(),
        )
    }

    fn ids(c: &TodoCollection) -> Vec<&str> {
        c.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn prepend_puts_newest_first() {
        let mut c = TodoCollection::new();
        c.prepend(record("a", "A"));
        c.prepend(record("b", "B"));
        c.prepend(record("c", "C"));
        assert_eq!(ids(&c), vec!["c", "b", "a"]);
        assert_eq!(c.version(), 3);
    }

    #[test]
    fn prepend_rejects_duplicate_id() {
        let mut c = TodoCollection::new();
        assert!(c.prepend(record("a", "A")));
        assert!(!c.prepend(record("a", "Other")));
        assert_eq!(c.len(), 1);
        assert_eq!(c.get(&TodoId::new("a")).unwrap().title, "A");
    }

    #[test]
    fn replace_keeps_position_id_and_created_at() {
        let mut c = TodoCollection::new();
        c.prepend(record("a", "A"));
        c.prepend(record("b", "B"));

        let mut edited = record("zzz", "A2");
        edited.created_at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        edited.status = Status::InProgress;
        assert!(c.replace(&TodoId::new("a"), edited));

        assert_eq!(ids(&c), vec!["b", "a"]);
        let a = c.get(&TodoId::new("a")).unwrap();
        assert_eq!(a.title, "A2");
        assert_eq!(a.status, Status::InProgress);
        assert_eq!(a.created_at, Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn replace_missing_is_noop() {
        let mut c = TodoCollection::new();
        c.prepend(record("a", "A"));
        let before = c.version();
        assert!(!c.replace(&TodoId::new("nope"), record("nope", "X")));
        assert_eq!(c.version(), before);
        assert_eq!(ids(&c), vec!["a"]);
    }

    #[test]
    fn identical_replace_does_not_bump_version() {
        let mut c = TodoCollection::new();
        c.prepend(record("a", "A"));
        let before = c.version();
        let same = c.get(&TodoId::new("a")).unwrap().clone();
        c.replace(&TodoId::new("a"), same);
        assert_eq!(c.version(), before);
    }

    #[test]
    fn remove_preserves_order() {
        let mut c = TodoCollection::new();
        for id in ["a", "b", "c"] {
            c.prepend(record(id, id));
        }
        assert!(c.remove(&TodoId::new("b")).is_some());
        assert_eq!(ids(&c), vec!["c", "a"]);
        assert!(c.remove(&TodoId::new("b")).is_none());
    }

    #[test]
    fn toggle_flips_only_completed() {
        let mut c = TodoCollection::new();
        let mut r = record("a", "A");
        r.priority = Priority::High;
        c.prepend(r.clone());
        assert!(c.toggle_complete(&TodoId::new("a")));
        let toggled = c.get(&TodoId::new("a")).unwrap();
        assert!(toggled.completed);
        assert_eq!(
            TodoRecord {
                completed: false,
                ..toggled.clone()
            },
            r
        );
        assert!(!c.toggle_complete(&TodoId::new("missing")));
    }

    #[test]
    fn reset_replaces_contents_and_dedups() {
        let mut c = TodoCollection::new();
        c.prepend(record("old", "Old"));
        c.reset(vec![record("x", "X"), record("y", "Y"), record("x", "X again")]);
        assert_eq!(ids(&c), vec!["x", "y"]);
        assert_eq!(c.get(&TodoId::new("x")).unwrap().title, "X");

        let before = c.version();
        c.reset(c.to_vec());
        assert_eq!(c.version(), before);
    }
}
