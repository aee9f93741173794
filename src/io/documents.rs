//! Durable document collection shared by every `tb` process.
//!
//! Each todo is one JSON document named `<id>.json` inside the collection
//! directory. Subscribers receive the full, ordered snapshot whenever a
//! document changes, whether through this handle or another process.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use crate::io::lock::{CollectionLock, LockError};
use crate::io::watcher::CollectionWatcher;
use crate::model::{TodoFields, TodoId, TodoRecord};

/// Error type for document collection operations
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("could not access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("could not encode document {id}: {source}")]
    Encode {
        id: TodoId,
        source: serde_json::Error,
    },
    #[error("no such document: {0}")]
    NotFound(TodoId),
    #[error("invalid document id \"{0}\"")]
    InvalidId(TodoId),
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("could not watch collection: {0}")]
    Watch(#[from] notify::Error),
}

/// The backend contract the shared store is written against
pub trait DocumentCollection {
    /// Store a new document; the collection assigns the id
    fn add(&self, fields: &TodoFields, created_at: DateTime<Utc>)
    -> Result<TodoId, CollectionError>;

    /// Overwrite an existing document. Fails with `NotFound` if it is gone.
    fn set(&self, id: &TodoId, record: &TodoRecord) -> Result<(), CollectionError>;

    /// Delete a document. Deleting a missing document succeeds.
    fn remove(&self, id: &TodoId) -> Result<(), CollectionError>;

    /// All documents, newest first
    fn snapshot(&self) -> Result<Vec<TodoRecord>, CollectionError>;

    /// Open a standing subscription. The current snapshot is queued
    /// immediately.
    fn subscribe(&self) -> Result<Subscription, CollectionError>;
}

type Snapshot = Vec<TodoRecord>;

/// Receives full collection snapshots until dropped
pub struct Subscription {
    rx: mpsc::Receiver<Snapshot>,
    _watcher: Option<CollectionWatcher>,
}

impl Subscription {
    /// Build a subscription fed by `rx` alone (no directory watch)
    pub fn from_channel(rx: mpsc::Receiver<Snapshot>) -> Self {
        Subscription { rx, _watcher: None }
    }

    /// Drain pending snapshots and return the newest one, if any
    pub fn latest(&self) -> Option<Snapshot> {
        let mut latest = None;
        while let Ok(snapshot) = self.rx.try_recv() {
            latest = Some(snapshot);
        }
        latest
    }
}

/// Directory-backed collection
pub struct DirCollection {
    dir: PathBuf,
    subscribers: Arc<Mutex<Vec<mpsc::Sender<Snapshot>>>>,
}

impl DirCollection {
    /// Open (creating if needed) the collection at `dir`
    pub fn open(dir: &Path) -> Result<Self, CollectionError> {
        fs::create_dir_all(dir).map_err(|e| CollectionError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        Ok(DirCollection {
            dir: dir.to_path_buf(),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<id>.json`. Ids that could name a file outside the
    /// collection are rejected.
    fn document_path(&self, id: &TodoId) -> Result<PathBuf, CollectionError> {
        if !is_valid_id(id.as_str()) {
            return Err(CollectionError::InvalidId(id.clone()));
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }

    fn write_document(&self, record: &TodoRecord) -> Result<(), CollectionError> {
        let content =
            serde_json::to_vec_pretty(record).map_err(|e| CollectionError::Encode {
                id: record.id.clone(),
                source: e,
            })?;
        let path = self.document_path(&record.id)?;
        atomic_write(&path, &content).map_err(|e| CollectionError::Io { path, source: e })
    }

    /// Push a fresh snapshot to every live subscriber
    fn notify_subscribers(&self) {
        broadcast(&self.dir, &self.subscribers);
    }
}

impl DocumentCollection for DirCollection {
    fn add(
        &self,
        fields: &TodoFields,
        created_at: DateTime<Utc>,
    ) -> Result<TodoId, CollectionError> {
        let id = TodoId::new(uuid::Uuid::new_v4().simple().to_string());
        let record = TodoRecord::new(id.clone(), fields.clone(), created_at);
        {
            let _lock = CollectionLock::acquire_default(&self.dir)?;
            self.write_document(&record)?;
        }
        self.notify_subscribers();
        Ok(id)
    }

    fn set(&self, id: &TodoId, record: &TodoRecord) -> Result<(), CollectionError> {
        {
            let _lock = CollectionLock::acquire_default(&self.dir)?;
            if !self.document_path(id)?.exists() {
                return Err(CollectionError::NotFound(id.clone()));
            }
            let mut record = record.clone();
            record.id = id.clone();
            self.write_document(&record)?;
        }
        self.notify_subscribers();
        Ok(())
    }

    fn remove(&self, id: &TodoId) -> Result<(), CollectionError> {
        {
            let _lock = CollectionLock::acquire_default(&self.dir)?;
            let path = self.document_path(id)?;
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(CollectionError::Io { path, source: e }),
            }
        }
        self.notify_subscribers();
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<TodoRecord>, CollectionError> {
        read_snapshot(&self.dir)
    }

    fn subscribe(&self) -> Result<Subscription, CollectionError> {
        let (tx, rx) = mpsc::channel();
        tx.send(self.snapshot()?).ok();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }

        let dir = self.dir.clone();
        let subscribers = Arc::clone(&self.subscribers);
        let watcher = CollectionWatcher::start(&self.dir, move || {
            broadcast(&dir, &subscribers);
        })?;

        Ok(Subscription {
            rx,
            _watcher: Some(watcher),
        })
    }
}

/// Read the snapshot once and send it to every subscriber still listening.
///
/// The read happens under the subscriber lock so a watcher broadcast can
/// never deliver an older snapshot after a newer one.
fn broadcast(dir: &Path, subscribers: &Mutex<Vec<mpsc::Sender<Snapshot>>>) {
    let Ok(mut subscribers) = subscribers.lock() else {
        return;
    };
    let snapshot = match read_snapshot(dir) {
        Ok(s) => s,
        Err(e) => {
            log::error!("event=snapshot_read status=error error={}", e);
            return;
        }
    };
    subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
}

/// A document id names exactly one file directly inside the collection
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && !id.contains("..")
        && !id.contains(['/', '\\', '\0'])
}

/// Load every document in `dir`, newest first. Unreadable documents are
/// skipped with a warning so one bad file cannot hide the rest.
///
/// The file stem is the record's id; any id stored in the body is ignored.
pub fn read_snapshot(dir: &Path) -> Result<Vec<TodoRecord>, CollectionError> {
    let entries = fs::read_dir(dir).map_err(|e| CollectionError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut records = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CollectionError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let Some(stem) = path.file_stem().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_json || stem.starts_with('.') {
            continue;
        }
        if !is_valid_id(stem) {
            log::warn!("event=document_skipped path={} error=invalid_id", path.display());
            continue;
        }

        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| {
                serde_json::from_str::<TodoRecord>(&text).map_err(|e| e.to_string())
            });
        match parsed {
            Ok(mut record) => {
                record.id = TodoId::new(stem);
                records.push(record);
            }
            Err(e) => log::warn!(
                "event=document_skipped path={} error={}",
                path.display(),
                e
            ),
        }
    }

    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    Ok(records)
}

/// Write via a temp file in the same directory, then rename over the target
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
