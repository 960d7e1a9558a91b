//! Per-game runtime settings consumed when spawning helper processes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Compatibility layer flavour.
///
/// Only Proton needs special handling; any flavour the launcher adds later
/// parses as [`WineKind::Other`] and runs like plain Wine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WineKind {
    #[default]
    Wine,
    Proton,
    Crossover,
    Toolkit,
    #[serde(other)]
    Other,
}

/// Compatibility layer binary selected for a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WineVersion {
    /// Path to the `wine` or `proton` executable.
    #[serde(default)]
    pub bin: String,
    #[serde(default, rename = "type")]
    pub kind: WineKind,
}

/// A user-defined environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

/// Environment overrides for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    #[serde(default)]
    pub wine_prefix: String,
    #[serde(default)]
    pub wine_version: WineVersion,
    #[serde(default, alias = "enviromentOptions")]
    pub environment_options: Vec<EnvVar>,
}

impl GameSettings {
    /// Builds the environment injected into processes run for this game.
    ///
    /// User-defined variables are applied last and win on conflict.
    pub fn runtime_env(&self) -> BTreeMap<String, String> {
        let mut env = BTreeMap::new();

        if !self.wine_prefix.is_empty() {
            match self.wine_version.kind {
                WineKind::Wine | WineKind::Crossover | WineKind::Toolkit | WineKind::Other => {
                    env.insert("WINEPREFIX".to_string(), self.wine_prefix.clone());
                }
                WineKind::Proton => {
                    env.insert(
                        "STEAM_COMPAT_DATA_PATH".to_string(),
                        self.wine_prefix.clone(),
                    );
                    env.insert(
                        "WINEPREFIX".to_string(),
                        Path::new(&self.wine_prefix)
                            .join("pfx")
                            .to_string_lossy()
                            .into_owned(),
                    );
                }
            }
        }

        for var in &self.environment_options {
            if var.key.is_empty() {
                continue;
            }
            env.insert(var.key.clone(), var.value.clone());
        }

        env
    }
}
