use std::path::{Path, PathBuf};

use savesync_resolver::{BoxFuture, HostFilesystem};

/// The user's documents folder, falling back to `$HOME/Documents`.
pub fn documents_dir() -> Option<PathBuf> {
    dirs::document_dir().or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
}

/// [`HostFilesystem`] backed by `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct TokioFilesystem;

impl TokioFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl HostFilesystem for TokioFilesystem {
    fn exists<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, bool> {
        // Permission errors count as missing.
        Box::pin(async move { tokio::fs::try_exists(path).await.unwrap_or(false) })
    }

    fn canonicalize<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, std::io::Result<PathBuf>> {
        Box::pin(tokio::fs::canonicalize(path))
    }

    fn documents_dir(&self) -> Option<PathBuf> {
        documents_dir()
    }
}
