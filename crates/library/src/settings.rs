use std::collections::HashMap;
use std::path::PathBuf;

use savesync_resolver::{BoxFuture, GameSettingsProvider, ResolveError};
use savesync_types::{GameIdentity, GameSettings};
use tracing::debug;

use crate::LibraryError;

/// Per-game settings under `<heroic config>/GamesConfig`.
///
/// Each file is keyed by the app name: `{ "<app>": { winePrefix, ... } }`.
pub struct GamesConfig {
    dir: PathBuf,
}

impl GamesConfig {
    pub fn new(heroic_config_dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: heroic_config_dir.into().join("GamesConfig"),
        }
    }

    /// Loads the settings of `app_name`; no file means default settings.
    pub async fn load(&self, app_name: &str) -> Result<GameSettings, LibraryError> {
        let path = self.dir.join(format!("{app_name}.json"));
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(app_name, "no game settings file, using defaults");
                return Ok(GameSettings::default());
            }
            Err(e) => return Err(e.into()),
        };

        // Other top-level keys (such as `version`) are not settings.
        let mut file: HashMap<String, serde_json::Value> = serde_json::from_str(&data)?;
        match file.remove(app_name) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(GameSettings::default()),
        }
    }
}

impl GameSettingsProvider for GamesConfig {
    fn settings<'a>(
        &'a self,
        game: &'a GameIdentity,
    ) -> BoxFuture<'a, Result<GameSettings, ResolveError>> {
        Box::pin(async move {
            self.load(&game.app_name)
                .await
                .map_err(|e| ResolveError::Settings(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use savesync_types::{Backend, WineKind};

    fn config_with(app_name: &str, content: &str) -> (tempfile::TempDir, GamesConfig) {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("GamesConfig");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{app_name}.json")), content).unwrap();
        let config = GamesConfig::new(tmp.path());
        (tmp, config)
    }

    #[tokio::test]
    async fn reads_wine_settings() {
        let (_tmp, config) = config_with(
            "Fortnite",
            r#"{
                "Fortnite": {
                    "winePrefix": "/prefixes/Fortnite",
                    "wineVersion": {"bin": "/opt/proton/proton", "name": "Proton 9", "type": "proton"},
                    "enviromentOptions": [{"key": "DXVK_HUD", "value": "1"}],
                    "autoSyncSaves": true
                },
                "version": "v0"
            }"#,
        );

        let settings = config.load("Fortnite").await.unwrap();

        assert_eq!(settings.wine_prefix, "/prefixes/Fortnite");
        assert_eq!(settings.wine_version.kind, WineKind::Proton);
        assert_eq!(settings.environment_options.len(), 1);
    }

    #[tokio::test]
    async fn crossover_settings_keep_prefix() {
        let (_tmp, config) = config_with(
            "1207658924",
            r#"{"1207658924":{"winePrefix":"/bottles/foo","wineVersion":{"bin":"/opt/cx/bin/wine","type":"crossover"}}}"#,
        );

        let settings = config.load("1207658924").await.unwrap();

        assert_eq!(settings.wine_version.kind, WineKind::Crossover);
        assert_eq!(settings.runtime_env()["WINEPREFIX"], "/bottles/foo");
    }

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GamesConfig::new(tmp.path());

        let settings = config
            .settings(&GameIdentity::new("Fortnite", Backend::Legendary))
            .await
            .unwrap();

        assert_eq!(settings, GameSettings::default());
    }

    #[tokio::test]
    async fn malformed_file_is_settings_error() {
        let (_tmp, config) = config_with("Fortnite", "[");

        let err = config
            .settings(&GameIdentity::new("Fortnite", Backend::Legendary))
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::Settings(_)));
    }
}
