//! Workspace configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tabdeck_session::FallbackPolicy;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the session database
    pub database_path: PathBuf,
    /// Tab selected when the selected tab closes and nothing better is known
    pub fallback_tab_index: usize,
    /// Prefer the previously selected tab over the fallback index
    pub restore_previous_tab: bool,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let policy = FallbackPolicy::default();

        Self {
            database_path: data_dir.join("tabdeck.db"),
            fallback_tab_index: policy.index,
            restore_previous_tab: policy.restore_previous,
            log_filter: "info".to_string(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("tabdeck"))
            .unwrap_or_else(|| PathBuf::from(".tabdeck"))
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        FallbackPolicy {
            index: self.fallback_tab_index,
            restore_previous: self.restore_previous_tab,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}
