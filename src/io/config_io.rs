use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::{Backend, BoardConfig};

pub const CONFIG_FILE: &str = "taskboard.toml";

/// Environment variables that override the config file
pub const ENV_BACKEND: &str = "TASKBOARD_BACKEND";
pub const ENV_COLLECTION_ROOT: &str = "TASKBOARD_COLLECTION_ROOT";
pub const ENV_PROJECT_ID: &str = "TASKBOARD_PROJECT_ID";
pub const ENV_COLLECTION: &str = "TASKBOARD_COLLECTION";
pub const ENV_LOG: &str = "TASKBOARD_LOG";

/// Error type for configuration I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid {var}: {message}")]
    InvalidEnv { var: &'static str, message: String },
    #[error("config template is invalid: {0}")]
    Template(#[from] toml_edit::TomlError),
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),
}

/// Resolved configuration plus the directory relative paths hang off
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Directory holding taskboard.toml (or the start directory if none)
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub config: BoardConfig,
}

impl Workspace {
    pub fn collection_dir(&self) -> PathBuf {
        self.config.store.collection.dir(&self.root)
    }

    pub fn log_dir(&self) -> PathBuf {
        match &self.config.log.dir {
            Some(dir) => self.root.join(dir),
            None => self.root.join(&self.config.store.collection.root).join("logs"),
        }
    }
}

/// Walk up from `start` looking for taskboard.toml
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load the workspace for `start`, applying process environment overrides
pub fn load_workspace(start: &Path) -> Result<Workspace, ConfigError> {
    load_workspace_with(start, |var| std::env::var(var).ok())
}

/// Same as `load_workspace`, reading overrides through `env`
pub fn load_workspace_with<F>(start: &Path, env: F) -> Result<Workspace, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let (root, config_path, mut config) = match discover_config(start) {
        Some(path) => {
            let config = read_config(&path)?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start.to_path_buf());
            (root, Some(path), config)
        }
        None => (start.to_path_buf(), None, BoardConfig::default()),
    };

    apply_env(&mut config, env)?;

    Ok(Workspace {
        root,
        config_path,
        config,
    })
}

fn read_config(path: &Path) -> Result<BoardConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Named connection parameters from the environment win over the file.
/// Empty values are ignored.
pub fn apply_env<F>(config: &mut BoardConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| env(var).filter(|v| !v.trim().is_empty());

    if let Some(value) = get(ENV_BACKEND) {
        config.store.backend = value
            .parse::<Backend>()
            .map_err(|message| ConfigError::InvalidEnv {
                var: ENV_BACKEND,
                message,
            })?;
    }
    if let Some(value) = get(ENV_COLLECTION_ROOT) {
        config.store.collection.root = PathBuf::from(value);
    }
    if let Some(value) = get(ENV_PROJECT_ID) {
        config.store.collection.project_id = value;
    }
    if let Some(value) = get(ENV_COLLECTION) {
        config.store.collection.collection = value;
    }
    if let Some(value) = get(ENV_LOG) {
        config.log.level = Some(value);
    }
    Ok(())
}

const CONFIG_TEMPLATE: &str = r##"[board]
name = "Taskboard"

[store]
# "memory" keeps todos for the lifetime of the board only.
# "collection" stores one JSON document per todo and shares them between
# every tb process pointed at the same directory.
backend = "memory"

[store.collection]
# Documents live in <root>/<project_id>/<collection>/, relative to this file.
# Each can be overridden with TASKBOARD_COLLECTION_ROOT, TASKBOARD_PROJECT_ID
# and TASKBOARD_COLLECTION.
root = ".taskboard"
project_id = "default"
collection = "todos"

[ui]
show_key_hints = true
mouse = true

# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# highlight = "#FB4196"
# todo_header = "#5B21B6"
# in_progress_header = "#FDE047"
# complete_header = "#16A34A"
# completed_card = "#C6E9A7"
# priority_high = "#FF5C00"
# priority_medium = "#FF00B8"
# priority_low = "#8A8A8A"

[log]
# trace | debug | info | warn | error (TASKBOARD_LOG overrides)
level = "info"
"##;

/// Options for writing a fresh config file
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub name: Option<String>,
    pub backend: Option<Backend>,
    pub project_id: Option<String>,
    pub force: bool,
}

/// Write taskboard.toml into `dir` from the commented template
pub fn init_config(dir: &Path, opts: &InitOptions) -> Result<PathBuf, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !opts.force {
        return Err(ConfigError::AlreadyExists(path));
    }

    let mut doc: toml_edit::DocumentMut = CONFIG_TEMPLATE.parse()?;
    if let Some(name) = &opts.name {
        set_board_name(&mut doc, name);
    }
    if let Some(backend) = opts.backend {
        set_backend(&mut doc, backend);
    }
    if let Some(project_id) = &opts.project_id {
        set_project_id(&mut doc, project_id);
    }

    fs::write(&path, doc.to_string()).map_err(|e| ConfigError::WriteError {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

pub fn set_board_name(doc: &mut toml_edit::DocumentMut, name: &str) {
    doc["board"]["name"] = toml_edit::value(name);
}

pub fn set_backend(doc: &mut toml_edit::DocumentMut, backend: Backend) {
    doc["store"]["backend"] = toml_edit::value(backend.as_str());
}

pub fn set_project_id(doc: &mut toml_edit::DocumentMut, project_id: &str) {
    doc["store"]["collection"]["project_id"] = toml_edit::value(project_id);
}
