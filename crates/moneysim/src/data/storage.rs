//! Per-scenario file storage
//!
//! Directory structure:
//! ~/.moneysim/
//!   config.yaml          # Current and baseline scenario ids
//!   moneysim.log
//!   scenarios/
//!     baseline.yaml
//!     scenario-1760000000000.yaml

use std::fs;
use std::path::{Path, PathBuf};

use super::scenario::{Scenario, ScenarioBook};

/// Configuration stored in config.yaml
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_scenario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_scenario: Option<String>,
}

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {msg}"),
            StorageError::Parse(msg) => write!(f, "Parse error: {msg}"),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Manages the data directory holding one YAML file per scenario
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the default data directory path (~/.moneysim/)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".moneysim")
    }

    fn config_path(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    fn scenarios_dir(&self) -> PathBuf {
        self.root.join("scenarios")
    }

    fn scenario_path(&self, id: &str) -> PathBuf {
        self.scenarios_dir()
            .join(format!("{}.yaml", sanitize_filename(id)))
    }

    /// Check if the data directory exists and has been initialized
    pub fn exists(&self) -> bool {
        self.root.exists() && self.scenarios_dir().exists()
    }

    pub fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to create data directory: {e}")))?;
        fs::create_dir_all(self.scenarios_dir())
            .map_err(|e| StorageError::Io(format!("Failed to create scenarios directory: {e}")))?;
        Ok(())
    }

    fn load_config(&self) -> Result<DataConfig, StorageError> {
        let config_path = self.config_path();
        if !config_path.exists() {
            return Ok(DataConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| StorageError::Io(format!("Failed to read config: {e}")))?;

        serde_saphyr::from_str(&content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse config: {e}")))
    }

    fn save_config(&self, config: &DataConfig) -> Result<(), StorageError> {
        let yaml = serde_saphyr::to_string(config)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize config: {e}")))?;

        fs::write(self.config_path(), yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write config: {e}")))
    }

    /// Paths of every scenario file currently on disk
    fn scenario_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        let scenarios_dir = self.scenarios_dir();
        if !scenarios_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&scenarios_dir)
            .map_err(|e| StorageError::Io(format!("Failed to read scenarios directory: {e}")))?;

        Ok(entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
            })
            .collect())
    }

    /// Load every scenario plus the saved pointers.
    ///
    /// Unreadable scenario files are skipped with a warning. Pointers to
    /// scenarios that no longer exist are dropped; a missing current pointer
    /// falls back to the baseline, then to the oldest scenario.
    pub fn load(&self) -> Result<ScenarioBook, StorageError> {
        if !self.exists() {
            self.init()?;
        }

        let config = self.load_config()?;
        let mut scenarios = Vec::new();

        for path in self.scenario_files()? {
            match load_scenario_from_path(&path) {
                Ok(scenario) => scenarios.push(scenario),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to load scenario");
                }
            }
        }
        scenarios.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let known = |id: &String| scenarios.iter().any(|s| &s.id == id);
        let baseline_id = config.baseline_scenario.filter(known);
        let current_id = config
            .current_scenario
            .filter(known)
            .or_else(|| baseline_id.clone())
            .or_else(|| scenarios.first().map(|s| s.id.clone()));

        tracing::debug!(count = scenarios.len(), "Loaded scenarios");

        Ok(ScenarioBook {
            scenarios,
            current_id,
            baseline_id,
        })
    }

    pub fn save_scenario(&self, scenario: &Scenario) -> Result<(), StorageError> {
        if !self.exists() {
            self.init()?;
        }

        let yaml = serde_saphyr::to_string(scenario)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize scenario: {e}")))?;

        fs::write(self.scenario_path(&scenario.id), yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write scenario: {e}")))
    }

    pub fn delete_scenario(&self, id: &str) -> Result<(), StorageError> {
        let path = self.scenario_path(id);
        if path.exists() {
            fs::remove_file(path)
                .map_err(|e| StorageError::Io(format!("Failed to delete scenario: {e}")))?;
        }
        Ok(())
    }

    /// Write the whole book: every scenario, the pointers, and removal of
    /// files for scenarios no longer in the book.
    pub fn save(&self, book: &ScenarioBook) -> Result<(), StorageError> {
        self.init()?;

        for scenario in &book.scenarios {
            self.save_scenario(scenario)?;
        }

        let keep: Vec<PathBuf> = book
            .scenarios
            .iter()
            .map(|s| self.scenario_path(&s.id))
            .collect();
        for path in self.scenario_files()? {
            if !keep.contains(&path) {
                tracing::info!(path = %path.display(), "Removing stale scenario file");
                fs::remove_file(&path)
                    .map_err(|e| StorageError::Io(format!("Failed to delete scenario: {e}")))?;
            }
        }

        self.save_config(&DataConfig {
            current_scenario: book.current_id.clone(),
            baseline_scenario: book.baseline_id.clone(),
        })
    }

    /// Export the whole book as a JSON document
    pub fn export_json(&self, book: &ScenarioBook, dest: &Path) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(book)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize book: {e}")))?;

        fs::write(dest, json).map_err(|e| StorageError::Io(format!("Failed to write file: {e}")))
    }

    /// Read a book previously written by [`export_json`](Self::export_json)
    /// or by the browser app. The document must carry a `scenarios` array.
    pub fn import_json(&self, source: &Path) -> Result<ScenarioBook, StorageError> {
        let content = fs::read_to_string(source)
            .map_err(|e| StorageError::Io(format!("Failed to read file: {e}")))?;

        parse_book_json(&content)
    }

    /// Get the root path of the data directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn load_scenario_from_path(path: &Path) -> Result<Scenario, StorageError> {
    let content = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read file: {e}")))?;

    serde_saphyr::from_str(&content)
        .map_err(|e| StorageError::Parse(format!("Failed to parse YAML: {e}")))
}

/// Parse an exported book; unknown fields such as `storageVersion` are ignored
pub fn parse_book_json(content: &str) -> Result<ScenarioBook, StorageError> {
    serde_json::from_str(content)
        .map_err(|e| StorageError::Parse(format!("Invalid data format: {e}")))
}

/// Sanitize a filename to be safe for the filesystem
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
