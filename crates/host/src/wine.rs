use std::process::Stdio;

use savesync_resolver::{BoxFuture, CompatibilityPathTranslator, ResolveError};
use savesync_types::{GameSettings, WineKind};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::HostError;

/// Translates guest paths with `winepath -u` run inside the game's prefix.
///
/// Guest variables such as `%APPDATA%` are expanded by `cmd` within the
/// prefix, so the result points at the prefix's own user folders. Existing
/// paths are returned with symlinks resolved.
#[derive(Debug, Clone, Default)]
pub struct WinePathTranslator;

impl WinePathTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Builds the translation command for `path`.
    fn command(settings: &GameSettings, path: &str) -> Result<Command, HostError> {
        let bin = settings.wine_version.bin.trim();
        if bin.is_empty() {
            return Err(HostError::NoWineBinary);
        }

        let mut cmd = Command::new(bin);
        if settings.wine_version.kind == WineKind::Proton {
            cmd.arg("runinprefix");
        }
        cmd.args(["cmd", "/c", "winepath", "-u", path])
            .env("WINEDEBUG", "-all")
            .envs(settings.runtime_env())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        Ok(cmd)
    }

    async fn run(&self, path: &str, settings: &GameSettings) -> Result<String, HostError> {
        let output = Self::command(settings, path)?.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HostError::Wine(format!(
                "winepath exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let unix = parse_winepath_output(&stdout)
            .map(|unix| normalize_lexically(&unix))
            .ok_or_else(|| HostError::Wine("winepath produced no output".into()))?;

        // Save folders often do not exist before the first launch.
        match tokio::fs::canonicalize(&unix).await {
            Ok(real) => Ok(real.to_string_lossy().into_owned()),
            Err(_) => Ok(unix),
        }
    }
}

impl CompatibilityPathTranslator for WinePathTranslator {
    fn translate<'a>(
        &'a self,
        path: &'a str,
        settings: &'a GameSettings,
    ) -> BoxFuture<'a, Result<String, ResolveError>> {
        Box::pin(async move {
            match self.run(path, settings).await {
                Ok(translated) => {
                    debug!(path, translated = %translated, "translated guest path");
                    Ok(translated)
                }
                Err(e) => {
                    warn!(path, error = %e, "winepath failed");
                    Err(e.into())
                }
            }
        })
    }
}

/// Extracts the translated path from `winepath` output.
///
/// Wine may print diagnostics before the path, so the last non-empty line
/// wins. Carriage returns from `cmd` are stripped.
pub fn parse_winepath_output(output: &str) -> Option<String> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r').trim())
        .rev()
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Collapses `.` and `..` segments and repeated separators without touching
/// the filesystem.
///
/// `..` never climbs above the root of an absolute path.
pub fn normalize_lexically(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&"..") | None if !absolute => parts.push(".."),
                Some(_) => {
                    parts.pop();
                }
                None => {}
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
