use std::path::Path;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches a collection directory for document changes made by any process.
///
/// The callback runs on notify's thread. Dropping the watcher stops it.
pub struct CollectionWatcher {
    _watcher: RecommendedWatcher,
}

impl CollectionWatcher {
    /// Start watching `dir`. `on_change` is called once per batch of
    /// relevant events.
    pub fn start<F>(dir: &Path, on_change: F) -> Result<Self, notify::Error>
    where
        F: Fn() + Send + 'static,
    {
        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(err) => {
                        log::warn!("event=watch_error error={}", err);
                        return;
                    }
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                if event.paths.iter().any(|p| is_document(p)) {
                    on_change();
                }
            },
            Config::default(),
        )?;

        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(CollectionWatcher { _watcher: watcher })
    }
}

/// Documents are `<id>.json`; the watch is non-recursive so only direct
/// children are reported. Temp files from atomic writes and the lock file
/// are ignored.
fn is_document(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_none_or(|n| n.starts_with('.'));
    !hidden && path.extension().and_then(|e| e.to_str()) == Some("json")
}
