use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Configuration from taskboard.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub board: BoardInfo,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardInfo {
    /// Shown in the header bar
    #[serde(default = "default_board_name")]
    pub name: String,
}

impl Default for BoardInfo {
    fn default() -> Self {
        BoardInfo {
            name: default_board_name(),
        }
    }
}

fn default_board_name() -> String {
    "Taskboard".to_string()
}

/// Which `TodoStore` implementation backs the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Ephemeral, lives as long as the process
    #[default]
    Memory,
    /// Shared document collection on disk
    Collection,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Memory => "memory",
            Backend::Collection => "collection",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "local" => Ok(Backend::Memory),
            "collection" | "remote" => Ok(Backend::Collection),
            other => Err(format!(
                "unknown backend \"{}\" (expected memory or collection)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub collection: CollectionConfig,
}

/// Connection parameters for the document collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Root directory, relative to the directory holding taskboard.toml
    #[serde(default = "default_collection_root")]
    pub root: PathBuf,
    #[serde(default = "default_project_id")]
    pub project_id: String,
    #[serde(default = "default_collection_name")]
    pub collection: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        CollectionConfig {
            root: default_collection_root(),
            project_id: default_project_id(),
            collection: default_collection_name(),
        }
    }
}

impl CollectionConfig {
    /// Directory holding the documents: `<root>/<project_id>/<collection>`
    pub fn dir(&self, base: &Path) -> PathBuf {
        base.join(&self.root)
            .join(&self.project_id)
            .join(&self.collection)
    }
}

fn default_collection_root() -> PathBuf {
    PathBuf::from(".taskboard")
}

fn default_project_id() -> String {
    "default".to_string()
}

fn default_collection_name() -> String {
    "todos".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Capture the mouse for clicks on cards, pickers and the create button
    #[serde(default = "default_true")]
    pub mouse: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            mouse: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// trace | debug | info | warn | error
    #[serde(default)]
    pub level: Option<String>,
    /// Log directory for the TUI, relative to the config directory
    #[serde(default)]
    pub dir: Option<PathBuf>,
}
