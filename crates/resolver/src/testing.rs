//! In-memory collaborators shared by the unit tests.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex};

use regex::{Captures, Regex};
use savesync_discovery::DiscoveryOutcome;
use savesync_types::{
    CloudSaveLocation, GameIdentity, GameInfo, GameSettings, GogInfoFile, InstallInfo,
    InstallPlatform,
};

use crate::collaborators::{
    BoxFuture, CompatibilityPathTranslator, GameMetadataStore, GameSettingsProvider,
    HostFilesystem, InfoFileReader, SaveDiscovery, ShellPathExpander,
};
use crate::error::ResolveError;

pub fn legendary_game(save_path: Option<&str>) -> GameInfo {
    GameInfo {
        app_name: "game1".into(),
        title: "Game One".into(),
        save_path: save_path.map(Into::into),
        install: InstallInfo {
            platform: InstallPlatform::Windows,
            install_path: Some("/games/game1".into()),
        },
        ..Default::default()
    }
}

pub fn gog_game(
    platform: InstallPlatform,
    install_path: Option<&str>,
    locations: Option<Vec<CloudSaveLocation>>,
) -> GameInfo {
    GameInfo {
        app_name: "foo".into(),
        title: "Foo".into(),
        gog_save_location: locations,
        install: InstallInfo {
            platform,
            install_path: install_path.map(Into::into),
        },
        ..Default::default()
    }
}

/// Store returning `initial`, or `refreshed` on forced refresh. Records the
/// `force_refresh` flag of every call.
pub struct MockStore {
    initial: Option<GameInfo>,
    refreshed: Option<GameInfo>,
    calls: Mutex<Vec<bool>>,
}

impl MockStore {
    pub fn new(initial: GameInfo) -> Self {
        Self {
            initial: Some(initial),
            refreshed: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn not_found() -> Self {
        Self {
            initial: None,
            refreshed: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_refreshed(mut self, refreshed: GameInfo) -> Self {
        self.refreshed = Some(refreshed);
        self
    }

    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().unwrap().clone()
    }
}

impl GameMetadataStore for MockStore {
    fn game_info<'a>(
        &'a self,
        game: &'a GameIdentity,
        force_refresh: bool,
    ) -> BoxFuture<'a, Result<GameInfo, ResolveError>> {
        self.calls.lock().unwrap().push(force_refresh);
        Box::pin(async move {
            let info = if force_refresh {
                self.refreshed.as_ref().or(self.initial.as_ref())
            } else {
                self.initial.as_ref()
            };
            info.cloned()
                .ok_or_else(|| ResolveError::GameNotFound(game.to_string()))
        })
    }
}

pub struct MockSettings {
    settings: Option<GameSettings>,
}

impl MockSettings {
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }

    pub fn failing() -> Self {
        Self { settings: None }
    }
}

impl GameSettingsProvider for MockSettings {
    fn settings<'a>(
        &'a self,
        _game: &'a GameIdentity,
    ) -> BoxFuture<'a, Result<GameSettings, ResolveError>> {
        Box::pin(async move {
            self.settings
                .clone()
                .ok_or_else(|| ResolveError::Settings("settings unavailable".into()))
        })
    }
}

/// Discovery returning a fixed outcome, recording app name and environment.
pub struct MockDiscovery {
    outcome: DiscoveryOutcome,
    calls: Mutex<Vec<(String, BTreeMap<String, String>)>>,
}

impl MockDiscovery {
    pub fn new(outcome: DiscoveryOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, BTreeMap<String, String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl SaveDiscovery for MockDiscovery {
    fn discover<'a>(
        &'a self,
        app_name: &'a str,
        env: &'a BTreeMap<String, String>,
    ) -> BoxFuture<'a, Result<DiscoveryOutcome, ResolveError>> {
        self.calls
            .lock()
            .unwrap()
            .push((app_name.to_string(), env.clone()));
        Box::pin(async move { Ok(self.outcome) })
    }
}

pub struct MockInfoFiles {
    client_id: Option<String>,
}

impl MockInfoFiles {
    pub fn with_client_id(id: &str) -> Self {
        Self {
            client_id: Some(id.into()),
        }
    }

    pub fn missing() -> Self {
        Self { client_id: None }
    }
}

impl InfoFileReader for MockInfoFiles {
    fn read_info_file(&self, _app_name: &str, _game: &GameInfo) -> Option<GogInfoFile> {
        self.client_id.as_ref().map(|id| GogInfoFile {
            client_id: Some(id.clone()),
        })
    }
}

static GUEST_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%(\w+)%").unwrap());

/// Wine stand-in: maps a few guest variables into `<prefix>/drive_c`
/// (`/wine` without a prefix), converts separators and normalizes `..`.
pub struct MockTranslator {
    fail: bool,
    calls: Mutex<Vec<(String, GameSettings)>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, GameSettings)> {
        self.calls.lock().unwrap().clone()
    }

    fn translate_now(path: &str, settings: &GameSettings) -> String {
        let prefix = if settings.wine_prefix.is_empty() {
            "/wine".to_string()
        } else {
            settings.wine_prefix.clone()
        };
        let expanded = GUEST_VAR.replace_all(path, |caps: &Captures<'_>| {
            let dir = match caps[1].to_ascii_uppercase().as_str() {
                "USERPROFILE" => "users/u",
                "APPDATA" => "users/u/AppData/Roaming",
                "LOCALAPPDATA" => "users/u/AppData/Local",
                _ => return caps[0].to_string(),
            };
            format!("{prefix}/drive_c/{dir}")
        });
        normalize(&expanded.replace('\\', "/"))
    }
}

impl CompatibilityPathTranslator for MockTranslator {
    fn translate<'a>(
        &'a self,
        path: &'a str,
        settings: &'a GameSettings,
    ) -> BoxFuture<'a, Result<String, ResolveError>> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), settings.clone()));
        Box::pin(async move {
            if self.fail {
                return Err(ResolveError::Translate("wine exited with 1".into()));
            }
            Ok(Self::translate_now(path, settings))
        })
    }
}

fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Host shell stand-in: `$HOME` is `/home/u`.
pub struct MockExpander {
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl MockExpander {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ShellPathExpander for MockExpander {
    fn expand<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String, ResolveError>> {
        self.calls.lock().unwrap().push(path.to_string());
        Box::pin(async move {
            if self.fail {
                return Err(ResolveError::Expand("shell unavailable".into()));
            }
            Ok(path.replace("$HOME", "/home/u"))
        })
    }
}

/// Filesystem where only registered paths exist.
pub struct MockFs {
    /// Existing path → canonical path, or `None` when canonicalize fails.
    entries: HashMap<PathBuf, Option<PathBuf>>,
    documents: Option<PathBuf>,
}

impl MockFs {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            documents: None,
        }
    }

    pub fn with_link(mut self, path: &str, target: &str) -> Self {
        self.entries
            .insert(PathBuf::from(path), Some(PathBuf::from(target)));
        self
    }

    pub fn with_broken(mut self, path: &str) -> Self {
        self.entries.insert(PathBuf::from(path), None);
        self
    }

    pub fn with_documents(mut self, dir: &str) -> Self {
        self.documents = Some(PathBuf::from(dir));
        self
    }
}

impl HostFilesystem for MockFs {
    fn exists<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, bool> {
        Box::pin(async move { self.entries.contains_key(path) })
    }

    fn canonicalize<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, std::io::Result<PathBuf>> {
        Box::pin(async move {
            match self.entries.get(path) {
                Some(Some(target)) => Ok(target.clone()),
                Some(None) => Err(std::io::Error::other("too many levels of symbolic links")),
                None => Err(std::io::ErrorKind::NotFound.into()),
            }
        })
    }

    fn documents_dir(&self) -> Option<PathBuf> {
        self.documents.clone()
    }
}
