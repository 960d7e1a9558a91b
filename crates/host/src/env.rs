use std::sync::LazyLock;

use regex::{Captures, Regex};
use savesync_resolver::{BoxFuture, ResolveError, ShellPathExpander};
use tracing::debug;

static UNIX_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{(\w+)\}|(\w+))").expect("unix variable pattern is valid")
});

static WINDOWS_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(\w+)%").expect("windows variable pattern is valid"));

/// Expands host environment variables in `path`.
///
/// Handles a leading `~`, `$NAME` and `${NAME}`, plus `%NAME%` when `windows`
/// is set. Variables `lookup` does not know are left untouched.
pub fn expand_env<F>(path: &str, windows: bool, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut expanded = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match lookup("HOME") {
            Some(home) => format!("{home}{rest}"),
            None => path.to_string(),
        },
        _ => path.to_string(),
    };

    expanded = UNIX_VAR
        .replace_all(&expanded, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            lookup(name).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned();

    if windows {
        expanded = WINDOWS_VAR
            .replace_all(&expanded, |caps: &Captures<'_>| {
                lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned();
    }

    expanded
}

/// Expands paths against the environment of the current process.
#[derive(Debug, Clone)]
pub struct EnvPathExpander {
    windows: bool,
}

impl EnvPathExpander {
    /// Creates an expander using the host's variable syntax.
    pub fn new() -> Self {
        Self {
            windows: cfg!(windows),
        }
    }
}

impl Default for EnvPathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellPathExpander for EnvPathExpander {
    fn expand<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String, ResolveError>> {
        Box::pin(async move {
            let expanded = expand_env(path, self.windows, |name| std::env::var(name).ok());
            debug!(path, expanded = %expanded, "expanded host path");
            Ok(expanded)
        })
    }
}
