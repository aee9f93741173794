//! Logging bootstrap.
//!
//! The board owns the terminal, so it logs to rotating files in the
//! workspace log directory. CLI commands log warnings and errors to stderr.

use std::path::{Path, PathBuf};

use flexi_logger::{
    Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};

const LOG_FILE_BASENAME: &str = "taskboard";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Error type for logger setup
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unsupported log level \"{0}\" (expected trace, debug, info, warn or error)")]
    InvalidLevel(String),
    #[error("could not create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not start logger: {0}")]
    Start(#[from] flexi_logger::FlexiLoggerError),
}

/// Where log records go
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// Rotating files under the directory
    Files(PathBuf),
    Stderr,
}

/// Default level when neither config nor environment sets one
pub fn default_level(target: &LogTarget) -> &'static str {
    match target {
        LogTarget::Files(_) => "info",
        LogTarget::Stderr => "warn",
    }
}

/// Start the global logger. Keep the returned handle alive for the
/// lifetime of the process; dropping it flushes and stops file output.
pub fn init_logging(level: Option<&str>, target: LogTarget) -> Result<LoggerHandle, LoggingError> {
    let level = match level {
        Some(l) => normalize_level(l)?,
        None => default_level(&target),
    };

    let logger = Logger::try_with_str(level)?;
    let handle = match &target {
        LogTarget::Files(dir) => {
            ensure_dir(dir)?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()?
        }
        LogTarget::Stderr => logger.log_to_stderr().start()?,
    };

    log::info!(
        "event=app_start version={} level={}",
        env!("CARGO_PKG_VERSION"),
        level
    );
    Ok(handle)
}

fn ensure_dir(dir: &Path) -> Result<(), LoggingError> {
    std::fs::create_dir_all(dir).map_err(|e| LoggingError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })
}

pub fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" | "none" => Ok("off"),
        _ => Err(LoggingError::InvalidLevel(level.to_string())),
    }
}
