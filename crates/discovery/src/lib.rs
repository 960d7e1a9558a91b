//! Save path discovery for backends that compute the path lazily.
//!
//! Runs the backend's sync tool with both upload and download disabled and
//! watches its human-facing prompts. The tool persists the path it computed
//! once the prompt is confirmed, so the caller re-reads its metadata after a
//! [`DiscoveryOutcome::Confirmed`] result.

pub mod markers;
pub mod runner;

// Re-export primary types.
pub use markers::{CONFIRM_MARKER, Marker, MarkerScanner, UNRESOLVABLE_MARKER};
pub use runner::{DEFAULT_DISCOVERY_TIMEOUT, DiscoveryOutcome, PathDiscoveryRunner};

/// Errors for discovery operations.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("failed to start sync tool: {0}")]
    Spawn(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
