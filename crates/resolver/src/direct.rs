//! Direct-path backend: one canonical save path per game.

use savesync_types::{GameIdentity, GameSettings};
use tracing::{debug, error, info, warn};

use crate::collaborators::{GameMetadataStore, GameSettingsProvider, SaveDiscovery};
use crate::error::ResolveError;

/// Returns the library's `save_path`, running discovery when it is unset.
pub struct DirectPathStrategy<'a> {
    pub store: &'a dyn GameMetadataStore,
    pub settings: &'a dyn GameSettingsProvider,
    pub discovery: &'a dyn SaveDiscovery,
}

impl DirectPathStrategy<'_> {
    /// Resolves the save path of `game`.
    ///
    /// Returns an empty string when discovery did not confirm a path.
    pub async fn resolve(&self, game: &GameIdentity) -> Result<String, ResolveError> {
        let app_name = game.app_name.as_str();
        let info = self.store.game_info(game, false).await?;

        if let Some(save_path) = info.save_path.filter(|path| !path.is_empty()) {
            debug!(app_name, save_path = %save_path, "save path from game info");
            return Ok(save_path);
        }

        info!(app_name, "computing default save path");
        let settings = match self.settings.settings(game).await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(app_name, error = %e, "failed to load game settings, using defaults");
                GameSettings::default()
            }
        };

        let outcome = self
            .discovery
            .discover(app_name, &settings.runtime_env())
            .await?;
        if !outcome.is_confirmed() {
            error!(app_name, ?outcome, "unable to compute default save path");
            return Ok(String::new());
        }

        // The sync tool persisted the confirmed path into the library.
        let refreshed = self.store.game_info(game, true).await?;
        let save_path = refreshed.save_path.unwrap_or_default();
        if save_path.is_empty() {
            warn!(app_name, "sync tool confirmed a save path but did not persist it");
        } else {
            info!(app_name, save_path = %save_path, "computed save path");
        }

        Ok(save_path)
    }
}
