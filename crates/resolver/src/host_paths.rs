//! Turning a placeholder-free template into an absolute host path.
//!
//! One strategy is picked per game: [`NativePaths`] when the game runs on the
//! host directly, [`CompatibilityPaths`] when it runs through Wine or Proton.

use std::path::Path;

use savesync_types::GameSettings;
use tracing::{debug, warn};

use crate::collaborators::{
    BoxFuture, CompatibilityPathTranslator, HostFilesystem, ShellPathExpander,
};
use crate::error::ResolveWarning;

/// Best-effort absolute path, with the problem that degraded it if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPath {
    pub path: String,
    pub warning: Option<ResolveWarning>,
}

impl HostPath {
    fn clean(path: String) -> Self {
        Self {
            path,
            warning: None,
        }
    }

    fn degraded(path: String, warning: ResolveWarning) -> Self {
        Self {
            path,
            warning: Some(warning),
        }
    }
}

/// Resolves remaining environment variables, `.`/`..` and symlinks.
///
/// Never fails; on error the best path computed so far is returned.
pub trait HostPaths: Send + Sync {
    fn to_absolute<'a>(&'a self, path: &'a str) -> BoxFuture<'a, HostPath>;
}

/// Native games: host shell expansion, then symlink resolution.
pub struct NativePaths<'a> {
    pub expander: &'a dyn ShellPathExpander,
    pub fs: &'a dyn HostFilesystem,
}

impl HostPaths for NativePaths<'_> {
    fn to_absolute<'a>(&'a self, path: &'a str) -> BoxFuture<'a, HostPath> {
        Box::pin(async move {
            let expanded = match self.expander.expand(path).await {
                Ok(expanded) => expanded,
                Err(e) => {
                    warn!(path, error = %e, "failed to expand host path");
                    return HostPath::degraded(
                        path.to_string(),
                        ResolveWarning::Expansion {
                            path: path.to_string(),
                            reason: e.to_string(),
                        },
                    );
                }
            };

            let candidate = Path::new(&expanded);
            if !self.fs.exists(candidate).await {
                warn!(path = %expanded, "save path does not exist, symlinks left unresolved");
                return HostPath::degraded(
                    expanded.clone(),
                    ResolveWarning::SymlinkResolution {
                        path: expanded,
                        reason: "path does not exist".into(),
                    },
                );
            }

            match self.fs.canonicalize(candidate).await {
                Ok(real) => {
                    let real = real.to_string_lossy().into_owned();
                    debug!(path = %expanded, real = %real, "resolved symlinks");
                    HostPath::clean(real)
                }
                Err(e) => {
                    warn!(path = %expanded, error = %e, "failed to resolve symlinks");
                    HostPath::degraded(
                        expanded.clone(),
                        ResolveWarning::SymlinkResolution {
                            path: expanded,
                            reason: e.to_string(),
                        },
                    )
                }
            }
        })
    }
}

/// Games run through a compatibility layer: the translator resolves guest
/// variables, normalizes and follows symlinks in one step.
pub struct CompatibilityPaths<'a> {
    pub translator: &'a dyn CompatibilityPathTranslator,
    pub settings: GameSettings,
}

impl HostPaths for CompatibilityPaths<'_> {
    fn to_absolute<'a>(&'a self, path: &'a str) -> BoxFuture<'a, HostPath> {
        Box::pin(async move {
            match self.translator.translate(path, &self.settings).await {
                Ok(translated) => HostPath::clean(translated),
                Err(e) => {
                    warn!(path, error = %e, "failed to translate guest path");
                    HostPath::degraded(
                        path.to_string(),
                        ResolveWarning::Translation {
                            path: path.to_string(),
                            reason: e.to_string(),
                        },
                    )
                }
            }
        })
    }
}
