//! Host-side implementations of the resolver's collaborator traits.
//!
//! - [`EnvPathExpander`]: `~`, `$NAME`, `${NAME}` (and `%NAME%` on Windows)
//!   from the process environment, for native games.
//! - [`WinePathTranslator`]: asks `winepath` inside the game's prefix, for
//!   games run through Wine or Proton.
//! - [`TokioFilesystem`]: existence checks, symlink resolution, documents
//!   folder.

mod env;
mod fs;
mod wine;

pub use env::{EnvPathExpander, expand_env};
pub use fs::{TokioFilesystem, documents_dir};
pub use wine::{WinePathTranslator, normalize_lexically, parse_winepath_output};

/// Errors for host operations.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no compatibility layer configured")]
    NoWineBinary,

    #[error("wine error: {0}")]
    Wine(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<HostError> for savesync_resolver::ResolveError {
    fn from(e: HostError) -> Self {
        match e {
            HostError::Io(e) => savesync_resolver::ResolveError::Io(e),
            other => savesync_resolver::ResolveError::Translate(other.to_string()),
        }
    }
}
