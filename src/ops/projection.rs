use crate::model::{Status, TodoId, TodoRecord};

/// Records split into the three status columns, each in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board<'a> {
    pub todo: Vec<&'a TodoRecord>,
    pub in_progress: Vec<&'a TodoRecord>,
    pub complete: Vec<&'a TodoRecord>,
}

impl<'a> Board<'a> {
    /// Project `records` (already most-recent-first) onto the columns
    pub fn project<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a TodoRecord>,
    {
        let mut board = Board::default();
        for record in records {
            board.column_mut(record.status).push(record);
        }
        board
    }

    pub fn column(&self, status: Status) -> &[&'a TodoRecord] {
        match status {
            Status::Todo => &self.todo,
            Status::InProgress => &self.in_progress,
            Status::Complete => &self.complete,
        }
    }

    fn column_mut(&mut self, status: Status) -> &mut Vec<&'a TodoRecord> {
        match status {
            Status::Todo => &mut self.todo,
            Status::InProgress => &mut self.in_progress,
            Status::Complete => &mut self.complete,
        }
    }

    pub fn count(&self, status: Status) -> usize {
        self.column(status).len()
    }

    pub fn total(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.complete.len()
    }

    /// Column and row of a record
    pub fn position(&self, id: &TodoId) -> Option<(Status, usize)> {
        Status::ALL.into_iter().find_map(|status| {
            self.column(status)
                .iter()
                .position(|r| &r.id == id)
                .map(|row| (status, row))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TodoFields};
    use crate::store::{MemoryStore, TodoStore};
    use pretty_assertions::assert_eq;

    fn titles(column: &[&TodoRecord]) -> Vec<String> {
        column.iter().map(|r| r.title.clone()).collect()
    }

    fn add(store: &mut MemoryStore, title: &str, status: Status) -> TodoId {
        store
            .create(TodoFields {
                title: title.into(),
                status,
                ..Default::default()
            })
            .unwrap()
    }

    #[test]
    fn columns_preserve_source_order() {
        let mut store = MemoryStore::new();
        add(&mut store, "t1", Status::Todo);
        add(&mut store, "p1", Status::InProgress);
        add(&mut store, "t2", Status::Todo);
        add(&mut store, "c1", Status::Complete);
        add(&mut store, "t3", Status::Todo);

        let board = Board::project(store.records().iter());
        assert_eq!(titles(&board.todo), vec!["t3", "t2", "t1"]);
        assert_eq!(titles(&board.in_progress), vec!["p1"]);
        assert_eq!(titles(&board.complete), vec!["c1"]);
        assert_eq!(board.total(), 5);
    }

    #[test]
    fn every_record_lands_in_exactly_one_column() {
        let mut store = MemoryStore::new();
        for i in 0..12 {
            let status = Status::from_index(i % 3).unwrap();
            add(&mut store, &format!("r{i}"), status);
        }
        let board = Board::project(store.records().iter());
        for record in store.records().iter() {
            let hits = Status::ALL
                .into_iter()
                .filter(|s| board.column(*s).iter().any(|r| r.id == record.id))
                .count();
            assert_eq!(hits, 1, "{} appears {} times", record.title, hits);
            assert_eq!(board.position(&record.id).unwrap().0, record.status);
        }
        assert_eq!(board.total(), store.records().len());
    }

    #[test]
    fn status_change_moves_record_between_columns() {
        let mut store = MemoryStore::new();
        let id = store
            .create(TodoFields {
                title: "A".into(),
                status: Status::Todo,
                priority: Priority::Low,
                ..Default::default()
            })
            .unwrap();

        let board = Board::project(store.records().iter());
        assert_eq!(board.position(&id), Some((Status::Todo, 0)));
        assert_eq!(board.count(Status::InProgress), 0);
        assert_eq!(board.count(Status::Complete), 0);
        let before = store.get(&id).unwrap().clone();

        let mut moved = before.clone();
        moved.status = Status::InProgress;
        store.update(&id, moved);

        let board = Board::project(store.records().iter());
        assert_eq!(board.count(Status::Todo), 0);
        assert_eq!(board.position(&id), Some((Status::InProgress, 0)));
        let after = board.in_progress[0];
        assert_eq!(
            TodoRecord {
                status: Status::Todo,
                ..after.clone()
            },
            before
        );
    }

    #[test]
    fn empty_store_gives_empty_columns() {
        let store = MemoryStore::new();
        let board = Board::project(store.records().iter());
        assert_eq!(board, Board::default());
        assert_eq!(board.position(&TodoId::new("x")), None);
    }
}
