//! Save-game location resolution.
//!
//! Given a game and its backend, computes where the game keeps its saves:
//!
//! - **legendary**: a single canonical `save_path`, discovered through the
//!   sync tool when the library has none yet ([`DirectPathStrategy`]).
//! - **gog**: named cloud-save locations with `<?NAME?>` placeholders and
//!   host or Wine environment variables ([`VariableExpansionStrategy`]).
//!
//! [`SavePathResolver`] is the single entry point. It never fails: problems
//! are logged and surface as empty or partial results.
//!
//! Everything outside path computation (library store, settings, Wine,
//! filesystem) is reached through the traits in [`collaborators`].

pub mod cloud;
pub mod collaborators;
pub mod defaults;
pub mod direct;
pub mod error;
pub mod host_paths;
pub mod resolver;
pub mod variables;

#[cfg(test)]
mod testing;

// Re-export primary types for convenience.
pub use cloud::{CloudResolution, LocationWarning, VariableExpansionStrategy};
pub use collaborators::{
    BoxFuture, CompatibilityPathTranslator, GameMetadataStore, GameSettingsProvider,
    HostFilesystem, InfoFileReader, SaveDiscovery, ShellPathExpander,
};
pub use defaults::{MISSING_CLIENT_ID, default_location};
pub use direct::DirectPathStrategy;
pub use error::{ResolveError, ResolveWarning};
pub use host_paths::{CompatibilityPaths, HostPath, HostPaths, NativePaths};
pub use resolver::{Collaborators, SavePathResolver};
pub use variables::{Expansion, SaveFolderVariable, VariableMap};
