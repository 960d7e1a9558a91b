//! Location synthesized for cloud-save games that declare none.

use savesync_types::{CloudSaveLocation, DEFAULT_LOCATION_NAME, InstallPlatform};

/// Stands in for the client id when the game's info file has none. Like an
/// unknown variable, it stays in the path for manual correction.
pub const MISSING_CLIENT_ID: &str = "<?CLIENT_ID?>";

/// Returns the `__default` location for a game with the given Galaxy client id.
///
/// Each platform maps to an explicit template; a new platform needs its own
/// arm here.
pub fn default_location(platform: InstallPlatform, client_id: &str) -> CloudSaveLocation {
    let location = match platform {
        InstallPlatform::Windows => format!(
            "%LocalAppData%/GOG.com/Galaxy/Applications/{client_id}/Storage/Shared/Files"
        ),
        InstallPlatform::Mac | InstallPlatform::Linux => format!(
            "$HOME/Library/Application Support/GOG.com/Galaxy/Applications/{client_id}/Storage"
        ),
    };

    CloudSaveLocation::new(DEFAULT_LOCATION_NAME, location)
}
