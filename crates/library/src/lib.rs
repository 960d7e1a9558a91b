//! Launcher library files read by the save path resolver.
//!
//! - `legendary`: `<legendary config>/installed.json`
//! - `gog`: `<heroic config>/gog_store/installed.json`
//! - per-game settings: `<heroic config>/GamesConfig/<app>.json`
//! - GOG info files: `goggame-<app>.info` inside the install folder

pub mod gog;
pub mod info_file;
pub mod legendary;
pub mod settings;

use std::path::PathBuf;

use savesync_resolver::{BoxFuture, GameMetadataStore, ResolveError};
use savesync_types::{Backend, GameIdentity, GameInfo};

pub use gog::GogStore;
pub use info_file::{GogInfoFiles, info_file_path};
pub use legendary::LegendaryStore;
pub use settings::GamesConfig;

/// Errors from library file operations.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("game not installed: {0}")]
    NotInstalled(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<LibraryError> for ResolveError {
    fn from(e: LibraryError) -> Self {
        match e {
            LibraryError::NotInstalled(app_name) => ResolveError::GameNotFound(app_name),
            other => ResolveError::Store(other.to_string()),
        }
    }
}

/// Installed games of every backend.
pub struct Library {
    legendary: LegendaryStore,
    gog: GogStore,
}

impl Library {
    pub fn new(
        legendary_config_dir: impl Into<PathBuf>,
        heroic_config_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            legendary: LegendaryStore::new(legendary_config_dir),
            gog: GogStore::new(heroic_config_dir),
        }
    }
}

impl GameMetadataStore for Library {
    fn game_info<'a>(
        &'a self,
        game: &'a GameIdentity,
        force_refresh: bool,
    ) -> BoxFuture<'a, Result<GameInfo, ResolveError>> {
        Box::pin(async move {
            let info = match game.backend {
                Backend::Legendary => self.legendary.game(&game.app_name, force_refresh).await?,
                Backend::Gog => self.gog.game(&game.app_name).await?,
            };
            Ok(info)
        })
    }
}

/// `~/.config/legendary`, legendary's own configuration folder.
pub fn default_legendary_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("legendary"))
}

/// `~/.config/heroic`, the launcher's configuration folder.
pub fn default_heroic_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("heroic"))
}
