//! `<?NAME?>` placeholders used in cloud-save location templates.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\?(\w+)\?>").expect("placeholder pattern is valid")
});

/// The closed set of placeholders a location template may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveFolderVariable {
    Install,
    SavedGames,
    ApplicationDataLocal,
    ApplicationDataLocalLow,
    ApplicationDataRoaming,
    ApplicationSupport,
    Documents,
}

impl SaveFolderVariable {
    /// Returns all variables.
    pub fn all() -> &'static [SaveFolderVariable] {
        &[
            SaveFolderVariable::Install,
            SaveFolderVariable::SavedGames,
            SaveFolderVariable::ApplicationDataLocal,
            SaveFolderVariable::ApplicationDataLocalLow,
            SaveFolderVariable::ApplicationDataRoaming,
            SaveFolderVariable::ApplicationSupport,
            SaveFolderVariable::Documents,
        ]
    }

    /// Name as written between `<?` and `?>`.
    pub fn name(self) -> &'static str {
        match self {
            SaveFolderVariable::Install => "INSTALL",
            SaveFolderVariable::SavedGames => "SAVED_GAMES",
            SaveFolderVariable::ApplicationDataLocal => "APPLICATION_DATA_LOCAL",
            SaveFolderVariable::ApplicationDataLocalLow => "APPLICATION_DATA_LOCAL_LOW",
            SaveFolderVariable::ApplicationDataRoaming => "APPLICATION_DATA_ROAMING",
            SaveFolderVariable::ApplicationSupport => "APPLICATION_SUPPORT",
            SaveFolderVariable::Documents => "DOCUMENTS",
        }
    }
}

impl fmt::Display for SaveFolderVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SaveFolderVariable {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SaveFolderVariable::all()
            .iter()
            .copied()
            .find(|var| var.name() == s)
            .ok_or(())
    }
}

/// Values for every [`SaveFolderVariable`] of one game.
///
/// Values other than `INSTALL` and a native `DOCUMENTS` still contain guest or
/// host environment variables; those are resolved afterwards by the host path
/// strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableMap {
    install_path: String,
    documents: String,
}

/// Result of placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub path: String,
    /// Unrecognized placeholder names, in order of appearance.
    pub unknown: Vec<String>,
}

impl VariableMap {
    /// Builds the map for a game installed at `install_path`.
    ///
    /// Native games use the host documents folder, falling back to
    /// `$HOME/Documents` when the host does not report one.
    pub fn for_game(install_path: &str, native: bool, host_documents: Option<&Path>) -> Self {
        let documents = if native {
            host_documents
                .map(|dir| dir.to_string_lossy().into_owned())
                .unwrap_or_else(|| "$HOME/Documents".to_string())
        } else {
            r"%USERPROFILE%\Documents".to_string()
        };

        Self {
            install_path: install_path.to_string(),
            documents,
        }
    }

    /// Returns the value substituted for `var`.
    pub fn value(&self, var: SaveFolderVariable) -> &str {
        match var {
            SaveFolderVariable::Install => &self.install_path,
            SaveFolderVariable::SavedGames => "%USERPROFILE%/Saved Games",
            SaveFolderVariable::ApplicationDataLocal => "%LOCALAPPDATA%",
            SaveFolderVariable::ApplicationDataLocalLow => r"%APPDATA%\..\LocalLow",
            SaveFolderVariable::ApplicationDataRoaming => "%APPDATA%",
            SaveFolderVariable::ApplicationSupport => "$HOME/Library/Application Support",
            SaveFolderVariable::Documents => &self.documents,
        }
    }

    /// Replaces every `<?NAME?>` in `template`.
    ///
    /// Unknown names are left in place, `<?` and `?>` included, so the broken
    /// path is visible to the user.
    pub fn expand(&self, template: &str) -> Expansion {
        let mut unknown = Vec::new();
        let path = PLACEHOLDER
            .replace_all(template, |caps: &Captures<'_>| {
                let name = &caps[1];
                match name.parse::<SaveFolderVariable>() {
                    Ok(var) => self.value(var).to_string(),
                    Err(()) => {
                        unknown.push(name.to_string());
                        caps[0].to_string()
                    }
                }
            })
            .into_owned();

        Expansion { path, unknown }
    }
}
