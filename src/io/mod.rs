pub mod config_io;
pub mod documents;
pub mod lock;
pub mod logging;
pub mod watcher;
