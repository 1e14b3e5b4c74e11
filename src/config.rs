//! Engine configuration.
//!
//! Holds the API base URL, the cache directory override, and the timing
//! knobs for debouncing and deletion polling. Stored as JSON at
//! `~/.config/pantrycache/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "pantrycache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Debounce window for duplicate mutation intents, in milliseconds.
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Deletion countdown poll tick, in milliseconds.
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Grace period assumed until the server confirms its own value, in seconds.
const DEFAULT_GRACE_SECS: i64 = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    /// Overrides the platform cache directory when set.
    pub cache_dir: Option<PathBuf>,
    pub debounce_ms: u64,
    pub poll_interval_ms: u64,
    pub default_grace_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            cache_dir: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            default_grace_secs: DEFAULT_GRACE_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn debounce_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}
