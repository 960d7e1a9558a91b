use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::saves::CloudSaveLocation;

/// Game distribution backend, each with its own save-location convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Epic games through `legendary`: one canonical save path per game.
    Legendary,
    /// GOG games: named cloud-save locations with placeholders.
    Gog,
}

impl Backend {
    /// Returns all supported backends.
    pub fn all() -> &'static [Backend] {
        &[Backend::Legendary, Backend::Gog]
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Legendary => write!(f, "legendary"),
            Backend::Gog => write!(f, "gog"),
        }
    }
}

/// Returned when parsing a backend tag outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown backend: {0}")]
pub struct UnknownBackend(pub String);

impl FromStr for Backend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legendary" => Ok(Backend::Legendary),
            "gog" => Ok(Backend::Gog),
            _ => Err(UnknownBackend(s.to_string())),
        }
    }
}

/// Identifies one game within one backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameIdentity {
    pub app_name: String,
    pub backend: Backend,
}

impl GameIdentity {
    pub fn new(app_name: impl Into<String>, backend: Backend) -> Self {
        Self {
            app_name: app_name.into(),
            backend,
        }
    }
}

impl fmt::Display for GameIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.backend, self.app_name)
    }
}

/// Platform a game build targets.
///
/// Accepts the spellings the launchers write to disk (`Windows`, `windows`,
/// `Mac`, `osx`, `linux`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallPlatform {
    #[default]
    #[serde(alias = "Windows", alias = "win32")]
    Windows,
    #[serde(alias = "Mac", alias = "osx", alias = "macos")]
    Mac,
    #[serde(alias = "Linux")]
    Linux,
}

impl InstallPlatform {
    /// Returns the platform of the running host.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => InstallPlatform::Windows,
            "macos" => InstallPlatform::Mac,
            _ => InstallPlatform::Linux,
        }
    }

    /// A game is native when its build targets the host platform.
    pub fn is_native_on(self, host: InstallPlatform) -> bool {
        self == host
    }
}

impl fmt::Display for InstallPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallPlatform::Windows => write!(f, "windows"),
            InstallPlatform::Mac => write!(f, "mac"),
            InstallPlatform::Linux => write!(f, "linux"),
        }
    }
}

/// Install section of a game's metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallInfo {
    #[serde(default)]
    pub platform: InstallPlatform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_path: Option<String>,
}

/// Game metadata as held by the library store.
///
/// Which fields are populated depends on the backend: `save_path` for
/// `legendary`, `gog_save_location` for `gog`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gog_save_location: Option<Vec<CloudSaveLocation>>,
    #[serde(default)]
    pub install: InstallInfo,
}
