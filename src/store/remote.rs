use chrono::Utc;

use crate::io::documents::{CollectionError, DocumentCollection, Subscription};
use crate::model::{Backend, TodoFields, TodoId, TodoRecord};

use super::{StoreFailure, StoreOp, TodoCollection, TodoStore};

/// Store mirroring a shared document collection.
///
/// Mutations go to the collection first. The visible records change only
/// when the subscription delivers a snapshot; nothing is applied
/// optimistically, so a rejected write leaves the view as it was.
pub struct RemoteStore<C: DocumentCollection> {
    collection: C,
    subscription: Subscription,
    records: TodoCollection,
    failures: Vec<StoreFailure>,
}

impl<C: DocumentCollection> RemoteStore<C> {
    /// Subscribe to `collection` and apply its initial snapshot
    pub fn open(collection: C) -> Result<Self, CollectionError> {
        let subscription = collection.subscribe()?;
        let mut store = RemoteStore {
            collection,
            subscription,
            records: TodoCollection::new(),
            failures: Vec::new(),
        };
        store.sync();
        Ok(store)
    }

    fn fail(&mut self, op: StoreOp, id: Option<&TodoId>, err: CollectionError) {
        log::error!(
            "event=todo_{} backend=collection status=error id={} error={}",
            op,
            id.map_or("-", |i| i.as_str()),
            err
        );
        self.failures.push(StoreFailure {
            op,
            id: id.cloned(),
            message: err.to_string(),
        });
    }
}

impl<C: DocumentCollection> TodoStore for RemoteStore<C> {
    fn backend(&self) -> Backend {
        Backend::Collection
    }

    fn records(&self) -> &TodoCollection {
        &self.records
    }

    fn create(&mut self, fields: TodoFields) -> Option<TodoId> {
        match self.collection.add(&fields, Utc::now()) {
            Ok(id) => {
                log::debug!("event=todo_create backend=collection id={}", id);
                Some(id)
            }
            Err(e) => {
                self.fail(StoreOp::Create, None, e);
                None
            }
        }
    }

    fn update(&mut self, id: &TodoId, record: TodoRecord) {
        let Some(current) = self.records.get(id) else {
            log::debug!("event=todo_update status=skipped reason=not_found id={}", id);
            return;
        };
        let mut record = record;
        record.id = current.id.clone();
        record.created_at = current.created_at;
        if let Err(e) = self.collection.set(id, &record) {
            self.fail(StoreOp::Update, Some(id), e);
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
                if let Err(e) = self.collection.remove(id) {
                    self.fail(StoreOp::Delete, Some(id), e);
                }
            }
        }
    }

    fn toggle_complete(&mut self, id: &TodoId) {
        let Some(current) = self.records.get(id) else {
            log::debug!("event=todo_toggle status=skipped reason=not_found id={}", id);
            return;
        };
        let toggled = TodoRecord {
            completed: !current.completed,
            ..current.clone()
        };
        if let Err(e) = self.collection.set(id, &toggled) {
            self.fail(StoreOp::ToggleComplete, Some(id), e);
        }
    }

    fn sync(&mut self) {
        if let Some(snapshot) = self.subscription.latest() {
            log::trace!("event=snapshot_applied records={}", snapshot.len());
            self.records.reset(snapshot);
        }
    }

    fn take_failures(&mut self) -> Vec<StoreFailure> {
        std::mem::take(&mut self.failures)
    }
}
