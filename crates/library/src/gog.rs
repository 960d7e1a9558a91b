use std::path::PathBuf;

use savesync_types::{CloudSaveLocation, GameInfo, InstallInfo, InstallPlatform};
use serde::Deserialize;
use tracing::debug;

use crate::LibraryError;

#[derive(Debug, Default, Deserialize)]
struct InstalledFile {
    #[serde(default)]
    installed: Vec<InstalledGame>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstalledGame {
    app_name: String,
    #[serde(default)]
    title: String,
    #[serde(default, rename = "install_path")]
    install_path: Option<String>,
    #[serde(default)]
    platform: InstallPlatform,
    #[serde(default, rename = "gog_save_location")]
    gog_save_location: Option<Vec<CloudSaveLocation>>,
}

/// GOG games installed through the launcher. Read on every call.
pub struct GogStore {
    path: PathBuf,
}

impl GogStore {
    pub fn new(heroic_config_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: heroic_config_dir
                .into()
                .join("gog_store")
                .join("installed.json"),
        }
    }

    /// Returns the metadata of an installed game.
    pub async fn game(&self, app_name: &str) -> Result<GameInfo, LibraryError> {
        let file = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => serde_json::from_str::<InstalledFile>(&data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => InstalledFile::default(),
            Err(e) => return Err(e.into()),
        };
        debug!("loaded {} gog game(s) from {:?}", file.installed.len(), self.path);

        let game = file
            .installed
            .into_iter()
            .find(|game| game.app_name == app_name)
            .ok_or_else(|| LibraryError::NotInstalled(app_name.to_string()))?;

        Ok(GameInfo {
            app_name: game.app_name,
            title: game.title,
            save_path: None,
            gog_save_location: game.gog_save_location,
            install: InstallInfo {
                platform: game.platform,
                install_path: game.install_path,
            },
        })
    }
}
