use std::path::{Path, PathBuf};

use savesync_resolver::InfoFileReader;
use savesync_types::{GameInfo, GogInfoFile, InstallPlatform};
use tracing::debug;

/// Location of `goggame-<app>.info` inside an install folder.
///
/// Mac bundles keep it under `Contents/Resources`.
pub fn info_file_path(install_path: &Path, app_name: &str, platform: InstallPlatform) -> PathBuf {
    let file_name = format!("goggame-{app_name}.info");
    match platform {
        InstallPlatform::Mac => install_path
            .join("Contents")
            .join("Resources")
            .join(file_name),
        InstallPlatform::Windows | InstallPlatform::Linux => install_path.join(file_name),
    }
}

/// Reads GOG info files from the game's install folder.
#[derive(Debug, Clone, Default)]
pub struct GogInfoFiles;

impl GogInfoFiles {
    pub fn new() -> Self {
        Self
    }
}

impl InfoFileReader for GogInfoFiles {
    fn read_info_file(&self, app_name: &str, game: &GameInfo) -> Option<GogInfoFile> {
        let install_path = game.install.install_path.as_deref()?;
        let path = info_file_path(Path::new(install_path), app_name, game.install.platform);

        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                debug!(app_name, path = %path.display(), error = %e, "info file unreadable");
                return None;
            }
        };

        match serde_json::from_str(&data) {
            Ok(info) => Some(info),
            Err(e) => {
                debug!(app_name, path = %path.display(), error = %e, "info file malformed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use savesync_types::InstallInfo;

    fn game(install_path: &Path, platform: InstallPlatform) -> GameInfo {
        GameInfo {
            app_name: "1207658924".into(),
            install: InstallInfo {
                platform,
                install_path: Some(install_path.to_string_lossy().into_owned()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn reads_client_id() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("goggame-1207658924.info"),
            r#"{"clientId":"53184922","gameId":"1207658924","name":"Foo"}"#,
        )
        .unwrap();

        let info = GogInfoFiles::new()
            .read_info_file("1207658924", &game(tmp.path(), InstallPlatform::Windows))
            .unwrap();

        assert_eq!(info.client_id.as_deref(), Some("53184922"));
    }

    #[test]
    fn mac_bundle_location() {
        let tmp = tempfile::tempdir().unwrap();
        let resources = tmp.path().join("Contents").join("Resources");
        std::fs::create_dir_all(&resources).unwrap();
        std::fs::write(
            resources.join("goggame-1207658924.info"),
            r#"{"clientId":"53184922"}"#,
        )
        .unwrap();

        let info = GogInfoFiles::new()
            .read_info_file("1207658924", &game(tmp.path(), InstallPlatform::Mac))
            .unwrap();

        assert_eq!(info.client_id.as_deref(), Some("53184922"));
    }

    #[test]
    fn missing_or_malformed_file_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let reader = GogInfoFiles::new();
        let foo = game(tmp.path(), InstallPlatform::Linux);

        assert!(reader.read_info_file("1207658924", &foo).is_none());

        std::fs::write(tmp.path().join("goggame-1207658924.info"), "not json").unwrap();
        assert!(reader.read_info_file("1207658924", &foo).is_none());
    }

    #[test]
    fn no_install_path_is_none() {
        let game = GameInfo::default();
        assert!(GogInfoFiles::new().read_info_file("1", &game).is_none());
    }
}
