//! The todo record store.
//!
//! `TodoStore` is the one capability the board and the CLI talk to. Two
//! implementations exist: `MemoryStore` (ephemeral) and `RemoteStore`
//! (mirrors a shared document collection through a snapshot
//! subscription). Which one is used is decided by configuration in
//! `open_store`.

pub mod collection;
pub mod memory;
pub mod remote;

use std::fmt;

pub use collection::TodoCollection;
pub use memory::MemoryStore;
pub use remote::RemoteStore;

use crate::io::config_io::Workspace;
use crate::io::documents::{CollectionError, DirCollection};
use crate::model::{Backend, TodoFields, TodoId, TodoRecord};

/// Error type for opening a store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not open document collection: {0}")]
    Collection(#[from] CollectionError),
}

/// Which mutation a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Create,
    Update,
    Delete,
    ToggleComplete,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreOp::Create => "create",
            StoreOp::Update => "update",
            StoreOp::Delete => "delete",
            StoreOp::ToggleComplete => "toggle",
        })
    }
}

/// A mutation the backend rejected. Already logged when recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure {
    pub op: StoreOp,
    pub id: Option<TodoId>,
    pub message: String,
}

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} {} failed: {}", self.op, id, self.message),
            None => write!(f, "{} failed: {}", self.op, self.message),
        }
    }
}

pub trait TodoStore {
    fn backend(&self) -> Backend;

    /// The visible collection, most recent first
    fn records(&self) -> &TodoCollection;

    /// Add a new todo at the front. `None` only if the backend rejected it.
    fn create(&mut self, fields: TodoFields) -> Option<TodoId>;

    /// Replace the todo stored under `id` with `record`. No-op if absent.
    fn update(&mut self, id: &TodoId, record: TodoRecord);

    /// Remove a todo. No-op if absent; refused while it is completed.
    fn delete(&mut self, id: &TodoId);

    /// Flip `completed`. No-op if absent.
    fn toggle_complete(&mut self, id: &TodoId);

    /// Apply pending change notifications
    fn sync(&mut self) {}

    /// Drain failures recorded since the last call
    fn take_failures(&mut self) -> Vec<StoreFailure> {
        Vec::new()
    }

    fn list(&self) -> Vec<TodoRecord> {
        self.records().to_vec()
    }

    fn get(&self, id: &TodoId) -> Option<&TodoRecord> {
        self.records().get(id)
    }

    /// Bumped on every visible change
    fn version(&self) -> u64 {
        self.records().version()
    }
}

/// Open the store selected by the workspace configuration
pub fn open_store(workspace: &Workspace) -> Result<Box<dyn TodoStore>, StoreError> {
    match workspace.config.store.backend {
        Backend::Memory => {
            log::info!("event=store_open backend=memory");
            Ok(Box::new(MemoryStore::new()))
        }
        Backend::Collection => {
            let dir = workspace.collection_dir();
            log::info!(
                "event=store_open backend=collection dir={}",
                dir.display()
            );
            let collection = DirCollection::open(&dir)?;
            Ok(Box::new(RemoteStore::open(collection)?))
        }
    }
}
