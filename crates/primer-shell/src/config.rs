use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::theme::{ThemeMode, UserSession};

/// Locator the custom-hooks panel fetches on mount.
pub const PROFILE_LOCATOR: &str = "https://jsonplaceholder.typicode.com/users/1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Tour settings. Every field is optional in the JSON file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Menu id shown at startup.
    pub initial_demo: u8,
    /// Directory for persisted values; in-memory when absent.
    pub storage_dir: Option<PathBuf>,
    pub theme: ThemeMode,
    pub user: UserSession,
    /// Canned responses by locator, merged over the built-in ones.
    pub fixtures: BTreeMap<String, Value>,
    /// Simulated latency for fixture responses.
    pub fetch_latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_demo: 1,
            storage_dir: None,
            theme: ThemeMode::Light,
            user: UserSession::default(),
            fixtures: BTreeMap::new(),
            fetch_latency_ms: 300,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("config: loaded {}", path.display());
        Ok(config)
    }

    /// Built-in fixtures with the configured ones layered on top.
    pub fn all_fixtures(&self) -> BTreeMap<String, Value> {
        let mut all = BTreeMap::new();
        all.insert(
            PROFILE_LOCATOR.to_string(),
            json!({
                "id": 1,
                "name": "Leanne Graham",
                "username": "Bret",
                "email": "Sincere@april.biz",
                "company": { "name": "Romaguera-Crona" }
            }),
        );
        all.extend(self.fixtures.clone());
        all
    }
}
