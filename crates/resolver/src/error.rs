//! Error and warning types for save path resolution.

use savesync_discovery::DiscoveryError;

/// Errors that abort resolution of a whole game.
///
/// They never cross [`crate::SavePathResolver`]; the resolver logs them and
/// returns an empty result instead.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("missing metadata for {app_name}: {field}")]
    MissingMetadata {
        app_name: String,
        field: &'static str,
    },

    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error("library store error: {0}")]
    Store(String),

    #[error("settings error: {0}")]
    Settings(String),

    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("path expansion error: {0}")]
    Expand(String),

    #[error("path translation error: {0}")]
    Translate(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems limited to one location. The location is still resolved, on a
/// best-effort path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveWarning {
    /// The placeholder is left verbatim in the path.
    #[error("unknown save path variable: {0}")]
    UnknownVariable(String),

    /// The default location was synthesized without a client id.
    #[error("no client id for the default save location")]
    MissingClientId,

    /// Host environment expansion failed; the unexpanded path is kept.
    #[error("failed to expand {path}: {reason}")]
    Expansion { path: String, reason: String },

    /// Wine path translation failed; the untranslated path is kept.
    #[error("failed to translate {path}: {reason}")]
    Translation { path: String, reason: String },

    /// Symlink resolution failed; the unresolved absolute path is kept.
    #[error("failed to resolve symlinks of {path}: {reason}")]
    SymlinkResolution { path: String, reason: String },
}
