use serde::{Deserialize, Serialize};

/// Name of the location synthesized when a cloud-save game defines none.
pub const DEFAULT_LOCATION_NAME: &str = "__default";

/// A named cloud-save location.
///
/// The same shape carries both the template (with placeholders) and the
/// resolved absolute path; only the content tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudSaveLocation {
    pub name: String,
    pub location: String,
}

impl CloudSaveLocation {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}

/// Result of a save path resolution. The variant follows the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SavePath {
    /// Single canonical path; empty when unresolved.
    Direct(String),
    /// Resolved cloud-save locations in input order.
    Cloud(Vec<CloudSaveLocation>),
}

impl SavePath {
    /// Returns true when nothing could be resolved.
    pub fn is_empty(&self) -> bool {
        match self {
            SavePath::Direct(path) => path.is_empty(),
            SavePath::Cloud(locations) => locations.is_empty(),
        }
    }
}

/// Fields of a GOG `goggame-<app>.info` file used here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GogInfoFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}
