pub mod game;
pub mod saves;
pub mod settings;

// Re-export primary types for convenience.
pub use game::{Backend, GameIdentity, GameInfo, InstallInfo, InstallPlatform, UnknownBackend};
pub use saves::{CloudSaveLocation, DEFAULT_LOCATION_NAME, GogInfoFile, SavePath};
pub use settings::{EnvVar, GameSettings, WineKind, WineVersion};
