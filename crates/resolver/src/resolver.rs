//! Entry point dispatching to the backend strategy.

use std::sync::Arc;

use savesync_types::{Backend, CloudSaveLocation, GameIdentity, InstallPlatform, SavePath};
use tracing::{error, warn};

use crate::cloud::{CloudResolution, VariableExpansionStrategy};
use crate::collaborators::{
    CompatibilityPathTranslator, GameMetadataStore, GameSettingsProvider, HostFilesystem,
    InfoFileReader, SaveDiscovery, ShellPathExpander,
};
use crate::direct::DirectPathStrategy;

/// The systems a [`SavePathResolver`] talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn GameMetadataStore>,
    pub settings: Arc<dyn GameSettingsProvider>,
    pub discovery: Arc<dyn SaveDiscovery>,
    pub info_files: Arc<dyn InfoFileReader>,
    pub translator: Arc<dyn CompatibilityPathTranslator>,
    pub expander: Arc<dyn ShellPathExpander>,
    pub fs: Arc<dyn HostFilesystem>,
}

/// Computes default save locations for games of any supported backend.
///
/// Holds no state between calls; every call re-reads metadata.
#[derive(Clone)]
pub struct SavePathResolver {
    deps: Collaborators,
    host: InstallPlatform,
}

impl SavePathResolver {
    /// Creates a resolver for the running host.
    pub fn new(deps: Collaborators) -> Self {
        Self {
            deps,
            host: InstallPlatform::host(),
        }
    }

    /// Overrides the host platform used to decide whether a game is native.
    pub fn with_host_platform(mut self, host: InstallPlatform) -> Self {
        self.host = host;
        self
    }

    /// Returns the default save location(s) of a game.
    ///
    /// `legendary` games yield [`SavePath::Direct`], empty when unresolved.
    /// `gog` games yield [`SavePath::Cloud`], one entry per location, in order,
    /// keeping every non-empty entry of `already_resolved` as is.
    pub async fn get_default_save_path(
        &self,
        app_name: &str,
        backend: Backend,
        already_resolved: &[CloudSaveLocation],
    ) -> SavePath {
        let game = GameIdentity::new(app_name, backend);
        match backend {
            Backend::Legendary => SavePath::Direct(self.resolve_direct(&game).await),
            Backend::Gog => {
                SavePath::Cloud(self.resolve_cloud(&game, already_resolved).await.locations)
            }
        }
    }

    /// Direct-path resolution; errors are logged and yield an empty path.
    pub async fn resolve_direct(&self, game: &GameIdentity) -> String {
        let strategy = DirectPathStrategy {
            store: self.deps.store.as_ref(),
            settings: self.deps.settings.as_ref(),
            discovery: self.deps.discovery.as_ref(),
        };

        match strategy.resolve(game).await {
            Ok(path) => path,
            Err(e) => {
                error!(app_name = %game.app_name, error = %e, "failed to resolve save path");
                String::new()
            }
        }
    }

    /// Cloud-save resolution with per-location warnings.
    ///
    /// Errors are logged and yield an empty resolution.
    pub async fn resolve_cloud(
        &self,
        game: &GameIdentity,
        already_resolved: &[CloudSaveLocation],
    ) -> CloudResolution {
        let strategy = VariableExpansionStrategy {
            store: self.deps.store.as_ref(),
            settings: self.deps.settings.as_ref(),
            info_files: self.deps.info_files.as_ref(),
            translator: self.deps.translator.as_ref(),
            expander: self.deps.expander.as_ref(),
            fs: self.deps.fs.as_ref(),
            host: self.host,
        };

        match strategy.resolve(game, already_resolved).await {
            Ok(resolution) => {
                if !resolution.warnings.is_empty() {
                    warn!(
                        app_name = %game.app_name,
                        warnings = resolution.warnings.len(),
                        "save locations resolved with warnings"
                    );
                }
                resolution
            }
            Err(e) => {
                error!(app_name = %game.app_name, error = %e, "failed to resolve save locations");
                CloudResolution::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        MockDiscovery, MockExpander, MockFs, MockInfoFiles, MockSettings, MockStore,
        MockTranslator, gog_game, legendary_game,
    };
    use savesync_discovery::DiscoveryOutcome;
    use savesync_types::GameSettings;

    fn resolver(store: MockStore, discovery: Arc<MockDiscovery>) -> SavePathResolver {
        SavePathResolver::new(Collaborators {
            store: Arc::new(store),
            settings: Arc::new(MockSettings::new(GameSettings::default())),
            discovery,
            info_files: Arc::new(MockInfoFiles::with_client_id("53184922")),
            translator: Arc::new(MockTranslator::new()),
            expander: Arc::new(MockExpander::new()),
            fs: Arc::new(MockFs::new()),
        })
        .with_host_platform(InstallPlatform::Linux)
    }

    #[tokio::test]
    async fn legendary_returns_direct_path() {
        let discovery = Arc::new(MockDiscovery::new(DiscoveryOutcome::Confirmed));
        let resolver = resolver(
            MockStore::new(legendary_game(Some("/home/u/.saves/game1"))),
            discovery.clone(),
        );

        let result = resolver
            .get_default_save_path("game1", Backend::Legendary, &[])
            .await;

        assert_eq!(result, SavePath::Direct("/home/u/.saves/game1".into()));
        assert_eq!(discovery.call_count(), 0);
    }

    #[tokio::test]
    async fn legendary_without_confirmation_returns_empty() {
        let discovery = Arc::new(MockDiscovery::new(DiscoveryOutcome::NoConfirmation));
        let resolver = resolver(MockStore::new(legendary_game(None)), discovery.clone());

        let result = resolver
            .get_default_save_path("game1", Backend::Legendary, &[])
            .await;

        assert_eq!(result, SavePath::Direct(String::new()));
        assert_eq!(discovery.call_count(), 1);
    }

    #[tokio::test]
    async fn legendary_store_error_degrades_to_empty() {
        let discovery = Arc::new(MockDiscovery::new(DiscoveryOutcome::Confirmed));
        let resolver = resolver(MockStore::not_found(), discovery);

        let result = resolver
            .get_default_save_path("game1", Backend::Legendary, &[])
            .await;

        assert_eq!(result, SavePath::Direct(String::new()));
    }

    #[tokio::test]
    async fn gog_returns_cloud_locations() {
        let discovery = Arc::new(MockDiscovery::new(DiscoveryOutcome::Confirmed));
        let store = MockStore::new(gog_game(
            InstallPlatform::Linux,
            Some("/games/Foo"),
            Some(vec![CloudSaveLocation::new("slot1", "<?INSTALL?>/saves")]),
        ));
        let resolver = resolver(store, discovery.clone());

        let result = resolver.get_default_save_path("foo", Backend::Gog, &[]).await;

        assert_eq!(
            result,
            SavePath::Cloud(vec![CloudSaveLocation::new("slot1", "/games/Foo/saves")])
        );
        // Cloud saves never run the sync tool.
        assert_eq!(discovery.call_count(), 0);
    }

    #[tokio::test]
    async fn gog_missing_metadata_degrades_to_empty() {
        let discovery = Arc::new(MockDiscovery::new(DiscoveryOutcome::Confirmed));
        let store = MockStore::new(gog_game(InstallPlatform::Linux, None, Some(vec![])));
        let resolver = resolver(store, discovery);

        let result = resolver.get_default_save_path("foo", Backend::Gog, &[]).await;

        assert_eq!(result, SavePath::Cloud(Vec::new()));
    }

    #[tokio::test]
    async fn gog_resolution_is_idempotent() {
        let discovery = Arc::new(MockDiscovery::new(DiscoveryOutcome::Confirmed));
        let store = MockStore::new(gog_game(
            InstallPlatform::Windows,
            Some("/games/Foo"),
            Some(vec![
                CloudSaveLocation::new("a", "<?APPLICATION_DATA_ROAMING?>/Foo"),
                CloudSaveLocation::new("b", "<?DOCUMENTS?>/Foo"),
            ]),
        ));
        let resolver = resolver(store, discovery);

        let SavePath::Cloud(first) = resolver.get_default_save_path("foo", Backend::Gog, &[]).await
        else {
            panic!("expected cloud result");
        };
        let second = resolver
            .get_default_save_path("foo", Backend::Gog, &first)
            .await;

        assert_eq!(second, SavePath::Cloud(first));
    }
}
