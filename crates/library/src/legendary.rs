use std::collections::HashMap;
use std::path::{Path, PathBuf};

use savesync_types::{GameInfo, InstallInfo, InstallPlatform};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::LibraryError;

/// One entry of legendary's `installed.json`.
#[derive(Debug, Clone, Deserialize)]
struct InstalledGame {
    #[serde(default)]
    app_name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    install_path: Option<String>,
    #[serde(default)]
    platform: InstallPlatform,
    #[serde(default)]
    save_path: Option<String>,
}

impl InstalledGame {
    fn into_game_info(self, app_name: &str) -> GameInfo {
        GameInfo {
            app_name: if self.app_name.is_empty() {
                app_name.to_string()
            } else {
                self.app_name
            },
            title: self.title,
            save_path: self.save_path,
            gog_save_location: None,
            install: InstallInfo {
                platform: self.platform,
                install_path: self.install_path,
            },
        }
    }
}

/// legendary's installed games, cached after the first read.
///
/// `save_path` is written by the sync tool itself, so callers that just ran it
/// pass `force_refresh` to see the new value.
pub struct LegendaryStore {
    path: PathBuf,
    cache: Mutex<Option<HashMap<String, InstalledGame>>>,
}

impl LegendaryStore {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: config_dir.into().join("installed.json"),
            cache: Mutex::new(None),
        }
    }

    /// Returns the metadata of an installed game.
    pub async fn game(
        &self,
        app_name: &str,
        force_refresh: bool,
    ) -> Result<GameInfo, LibraryError> {
        let mut cache = self.cache.lock().await;
        if force_refresh || cache.is_none() {
            *cache = Some(load_installed(&self.path).await?);
        }

        cache
            .as_ref()
            .and_then(|games| games.get(app_name))
            .cloned()
            .map(|game| game.into_game_info(app_name))
            .ok_or_else(|| LibraryError::NotInstalled(app_name.to_string()))
    }
}

/// Reads `installed.json`; a missing file is an empty library.
async fn load_installed(path: &Path) -> Result<HashMap<String, InstalledGame>, LibraryError> {
    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(e.into()),
    };
    let games: HashMap<String, InstalledGame> = serde_json::from_str(&data)?;
    debug!("loaded {} legendary game(s) from {:?}", games.len(), path);
    Ok(games)
}
