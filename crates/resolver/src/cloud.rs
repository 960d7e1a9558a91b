//! Cloud-save backend: named locations with placeholders.

use savesync_types::{
    CloudSaveLocation, DEFAULT_LOCATION_NAME, GameIdentity, GameSettings, InstallPlatform,
};
use tracing::{debug, warn};

use crate::collaborators::{
    CompatibilityPathTranslator, GameMetadataStore, GameSettingsProvider, HostFilesystem,
    InfoFileReader, ShellPathExpander,
};
use crate::defaults::{MISSING_CLIENT_ID, default_location};
use crate::error::{ResolveError, ResolveWarning};
use crate::host_paths::{CompatibilityPaths, HostPaths, NativePaths};
use crate::variables::VariableMap;

/// A warning tied to the location it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationWarning {
    pub location: String,
    pub warning: ResolveWarning,
}

/// Resolved locations, in input order, plus what went wrong along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloudResolution {
    pub locations: Vec<CloudSaveLocation>,
    pub warnings: Vec<LocationWarning>,
}

/// Resolves every cloud-save location of a game to an absolute path.
pub struct VariableExpansionStrategy<'a> {
    pub store: &'a dyn GameMetadataStore,
    pub settings: &'a dyn GameSettingsProvider,
    pub info_files: &'a dyn InfoFileReader,
    pub translator: &'a dyn CompatibilityPathTranslator,
    pub expander: &'a dyn ShellPathExpander,
    pub fs: &'a dyn HostFilesystem,
    pub host: InstallPlatform,
}

impl VariableExpansionStrategy<'_> {
    /// Resolves the locations of `game`.
    ///
    /// Locations found in `already_resolved` with a non-empty path are passed
    /// through untouched. The output has one entry per location, in the
    /// order the library lists them.
    pub async fn resolve(
        &self,
        game: &GameIdentity,
        already_resolved: &[CloudSaveLocation],
    ) -> Result<CloudResolution, ResolveError> {
        let app_name = game.app_name.as_str();
        let info = self.store.game_info(game, false).await?;

        let missing = |field| ResolveError::MissingMetadata {
            app_name: app_name.to_string(),
            field,
        };
        let install_path = info
            .install
            .install_path
            .clone()
            .filter(|path| !path.is_empty())
            .ok_or_else(|| missing("install_path"))?;
        let mut templates = info
            .gog_save_location
            .clone()
            .ok_or_else(|| missing("gog_save_location"))?;

        let mut resolution = CloudResolution::default();
        if templates.is_empty() {
            let client_id = self
                .info_files
                .read_info_file(app_name, &info)
                .and_then(|file| file.client_id)
                .filter(|id| !id.is_empty());
            let client_id = match client_id {
                Some(id) => id,
                None => {
                    warn!(app_name, "no client id in info file, default location left incomplete");
                    resolution.warnings.push(LocationWarning {
                        location: DEFAULT_LOCATION_NAME.to_string(),
                        warning: ResolveWarning::MissingClientId,
                    });
                    MISSING_CLIENT_ID.to_string()
                }
            };
            debug!(app_name, client_id = %client_id, "no save locations defined, assuming default");
            templates.push(default_location(info.install.platform, &client_id));
        }

        let native = info.install.platform.is_native_on(self.host);
        let documents = if native { self.fs.documents_dir() } else { None };
        let variables = VariableMap::for_game(&install_path, native, documents.as_deref());
        let host_paths = self.host_paths(game, native).await;

        for template in templates {
            debug!(app_name, location = %template.name, path = %template.location, "resolving location");

            let predefined = already_resolved
                .iter()
                .find(|location| location.name == template.name);
            if let Some(predefined) = predefined.filter(|l| !l.location.is_empty()) {
                debug!(
                    app_name,
                    location = %predefined.name,
                    path = %predefined.location,
                    "location already defined"
                );
                resolution.locations.push(predefined.clone());
                continue;
            }

            let expansion = variables.expand(&template.location);
            for variable in expansion.unknown {
                warn!(
                    app_name,
                    location = %template.name,
                    variable = %variable,
                    "unknown save path variable, left in path for manual correction"
                );
                resolution.warnings.push(LocationWarning {
                    location: template.name.clone(),
                    warning: ResolveWarning::UnknownVariable(variable),
                });
            }
            debug!(app_name, location = %template.name, path = %expansion.path, "variables expanded");

            let absolute = host_paths.to_absolute(&expansion.path).await;
            if let Some(warning) = absolute.warning {
                resolution.warnings.push(LocationWarning {
                    location: template.name.clone(),
                    warning,
                });
            }
            debug!(app_name, location = %template.name, path = %absolute.path, "location resolved");

            resolution.locations.push(CloudSaveLocation {
                name: template.name,
                location: absolute.path,
            });
        }

        Ok(resolution)
    }

    /// Picks the host path strategy for the game.
    async fn host_paths(&self, game: &GameIdentity, native: bool) -> Box<dyn HostPaths + '_> {
        if native {
            return Box::new(NativePaths {
                expander: self.expander,
                fs: self.fs,
            });
        }

        let settings = match self.settings.settings(game).await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(app_name = %game.app_name, error = %e, "failed to load game settings, using defaults");
                GameSettings::default()
            }
        };
        Box::new(CompatibilityPaths {
            translator: self.translator,
            settings,
        })
    }
}
