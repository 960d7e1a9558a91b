//! CLI configuration.
//!
//! Read from `~/.config/savesync/config.json` unless `--config` names another
//! file. Every field is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use savesync_discovery::DEFAULT_DISCOVERY_TIMEOUT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The `legendary` executable.
    pub legendary_bin: String,

    /// Arguments placed before `sync-saves`, for wrappers such as `flatpak run`.
    pub legendary_args: Vec<String>,

    /// legendary's configuration folder (`installed.json`).
    pub legendary_config_dir: Option<PathBuf>,

    /// The launcher's configuration folder (`gog_store`, `GamesConfig`).
    pub heroic_config_dir: Option<PathBuf>,

    /// Seconds before the sync tool is abandoned; 0 waits forever.
    pub discovery_timeout_secs: u64,

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            legendary_bin: "legendary".into(),
            legendary_args: Vec::new(),
            legendary_config_dir: None,
            heroic_config_dir: None,
            discovery_timeout_secs: DEFAULT_DISCOVERY_TIMEOUT.as_secs(),
            log_filter: None,
        }
    }
}

impl Config {
    /// Loads the configuration; a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn discovery_timeout(&self) -> Option<Duration> {
        match self.discovery_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("savesync").join("config.json"))
}
