//! Interfaces to the systems the resolver consumes.
//!
//! The CLI wires real implementations (`savesync-library`, `savesync-host`);
//! tests use in-memory mocks.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use savesync_discovery::{DiscoveryOutcome, PathDiscoveryRunner};
use savesync_types::{GameIdentity, GameInfo, GameSettings, GogInfoFile};

use crate::error::ResolveError;

/// Boxed future returned by the async collaborator methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Library metadata for installed games.
pub trait GameMetadataStore: Send + Sync {
    /// Returns the metadata of a game.
    ///
    /// With `force_refresh` the store must bypass any cache so that values
    /// persisted by external tools are visible.
    fn game_info<'a>(
        &'a self,
        game: &'a GameIdentity,
        force_refresh: bool,
    ) -> BoxFuture<'a, Result<GameInfo, ResolveError>>;
}

/// Per-game runtime settings.
pub trait GameSettingsProvider: Send + Sync {
    fn settings<'a>(
        &'a self,
        game: &'a GameIdentity,
    ) -> BoxFuture<'a, Result<GameSettings, ResolveError>>;
}

/// Derives a save path the direct-path backend has not computed yet.
pub trait SaveDiscovery: Send + Sync {
    fn discover<'a>(
        &'a self,
        app_name: &'a str,
        env: &'a BTreeMap<String, String>,
    ) -> BoxFuture<'a, Result<DiscoveryOutcome, ResolveError>>;
}

impl SaveDiscovery for PathDiscoveryRunner {
    fn discover<'a>(
        &'a self,
        app_name: &'a str,
        env: &'a BTreeMap<String, String>,
    ) -> BoxFuture<'a, Result<DiscoveryOutcome, ResolveError>> {
        Box::pin(async move { Ok(self.run(app_name, env).await?) })
    }
}

/// Reads the per-game info file shipped with cloud-save games.
pub trait InfoFileReader: Send + Sync {
    fn read_info_file(&self, app_name: &str, game: &GameInfo) -> Option<GogInfoFile>;
}

/// Turns a guest (Windows) path into a host path for games run through a
/// compatibility layer.
///
/// Implementations expand guest environment variables, normalize `.`/`..`
/// and resolve symlinks of existing paths.
pub trait CompatibilityPathTranslator: Send + Sync {
    fn translate<'a>(
        &'a self,
        path: &'a str,
        settings: &'a GameSettings,
    ) -> BoxFuture<'a, Result<String, ResolveError>>;
}

/// Expands host environment variables in a path, for native games.
pub trait ShellPathExpander: Send + Sync {
    fn expand<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String, ResolveError>>;
}

/// Host filesystem queries used for native games.
pub trait HostFilesystem: Send + Sync {
    fn exists<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, bool>;

    /// Resolves symlinks and `.`/`..` segments.
    fn canonicalize<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, std::io::Result<PathBuf>>;

    /// The user's documents folder on the host.
    fn documents_dir(&self) -> Option<PathBuf>;
}
