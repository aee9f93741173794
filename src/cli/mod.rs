pub mod commands;
pub mod handlers;
pub mod output;

use crate::io::config_io::ConfigError;
use crate::model::TodoId;
use crate::store::{StoreError, StoreFailure};

/// Everything a `tb` subcommand can fail with
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no todo matches \"{0}\"")]
    NotFound(String),
    #[error("\"{prefix}\" is ambiguous ({count} todos match)")]
    Ambiguous { prefix: String, count: usize },
    #[error("todo {0} is completed; reopen it with `tb toggle` first")]
    Locked(TodoId),
    #[error(
        "the memory backend does not outlive a command; run `tb init --backend collection` or set TASKBOARD_BACKEND=collection"
    )]
    MemoryBackend,
    #[error("invalid due date \"{0}\" (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("nothing to change (pass --title, --description or --date)")]
    NothingToChange,
    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Failed(Vec<StoreFailure>),
    #[error("could not encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
