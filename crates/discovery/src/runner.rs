use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tracing::{debug, info, warn};

use crate::DiscoveryError;
use crate::markers::{Marker, MarkerScanner};

/// Upper bound on one discovery run.
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(60);

const READ_CHUNK_SIZE: usize = 4096;

/// How a discovery run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// The tool's path was confirmed; it persists it on its own.
    Confirmed,
    /// The tool cannot expand the path without manual input.
    Unresolvable,
    /// The tool exited without asking for confirmation.
    NoConfirmation,
    /// The tool produced no verdict before the timeout.
    TimedOut,
}

impl DiscoveryOutcome {
    pub fn is_confirmed(self) -> bool {
        self == DiscoveryOutcome::Confirmed
    }
}

/// Runs `sync-saves` in dry-run mode and answers its confirmation prompt.
///
/// Every run owns exactly one child process, which is terminated on all
/// exit paths.
#[derive(Debug, Clone)]
pub struct PathDiscoveryRunner {
    program: PathBuf,
    prefix_args: Vec<String>,
    timeout: Option<Duration>,
}

impl PathDiscoveryRunner {
    /// Creates a runner for the given sync tool executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
            timeout: Some(DEFAULT_DISCOVERY_TIMEOUT),
        }
    }

    /// Arguments placed before the `sync-saves` subcommand (wrapper scripts,
    /// `flatpak run` style launchers).
    pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the run timeout. `None` waits for the tool indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the full argument list for a game.
    pub fn command_args(&self, app_name: &str) -> Vec<String> {
        let mut args = self.prefix_args.clone();
        args.extend([
            "sync-saves".to_string(),
            app_name.to_string(),
            "--skip-upload".to_string(),
            "--skip-download".to_string(),
        ]);
        args
    }

    /// Runs the tool for `app_name` with `env` added to its environment.
    ///
    /// Only a failure to start the process is an error; every other ending
    /// is reported as a [`DiscoveryOutcome`].
    pub async fn run(
        &self,
        app_name: &str,
        env: &BTreeMap<String, String>,
    ) -> Result<DiscoveryOutcome, DiscoveryError> {
        info!(app_name, program = %self.program.display(), "running save path discovery");

        let mut child = Command::new(&self.program)
            .args(self.command_args(app_name))
            .envs(env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DiscoveryError::Spawn(format!("{}: {e}", self.program.display()))
            })?;

        let exchange = answer_prompts(&mut child, app_name);
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, exchange).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(app_name, timeout = ?limit, "sync tool did not finish in time");
                    Ok(DiscoveryOutcome::TimedOut)
                }
            },
            None => exchange.await,
        };

        match result {
            Ok(DiscoveryOutcome::Confirmed | DiscoveryOutcome::NoConfirmation) => {}
            // Still running, or the exchange broke off midway.
            Ok(DiscoveryOutcome::Unresolvable | DiscoveryOutcome::TimedOut) | Err(_) => {
                terminate(&mut child, app_name).await;
            }
        }

        let outcome = result?;
        debug!(app_name, ?outcome, "save path discovery finished");
        Ok(outcome)
    }
}

/// Reads the tool's output until it exits or gives up.
///
/// Returns `Unresolvable` as soon as that marker is seen, leaving the child
/// running for the caller to kill. Otherwise waits for the child to exit.
async fn answer_prompts(
    child: &mut Child,
    app_name: &str,
) -> Result<DiscoveryOutcome, DiscoveryError> {
    let mut stdin = child.stdin.take();
    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();

    let mut out_buf = [0u8; READ_CHUNK_SIZE];
    let mut err_buf = [0u8; READ_CHUNK_SIZE];
    let mut out_scanner = MarkerScanner::new();
    let mut err_scanner = MarkerScanner::new();
    let mut confirmed = false;

    while stdout.is_some() || stderr.is_some() {
        let (read, from_stdout) = tokio::select! {
            n = read_chunk(&mut stdout, &mut out_buf) => (n?, true),
            n = read_chunk(&mut stderr, &mut err_buf) => (n?, false),
        };

        if read == 0 {
            if from_stdout {
                stdout = None;
            } else {
                stderr = None;
            }
            continue;
        }

        let (chunk, scanner) = if from_stdout {
            (&out_buf[..read], &mut out_scanner)
        } else {
            (&err_buf[..read], &mut err_scanner)
        };
        debug!(
            app_name,
            output = %String::from_utf8_lossy(chunk).trim_end(),
            "sync tool output"
        );

        for marker in scanner.feed(chunk) {
            match marker {
                Marker::Confirm => {
                    debug!(app_name, "confirming computed save path");
                    confirm(&mut stdin, app_name).await;
                    confirmed = true;
                }
                Marker::Unresolvable => {
                    // Wins over an earlier confirmation: nothing usable was persisted.
                    warn!(app_name, confirmed, "sync tool could not expand the save path variables");
                    return Ok(DiscoveryOutcome::Unresolvable);
                }
            }
        }
    }

    drop(stdin);
    let status = child.wait().await?;
    if !status.success() {
        warn!(app_name, %status, "sync tool exited with failure");
    }

    Ok(if confirmed {
        DiscoveryOutcome::Confirmed
    } else {
        DiscoveryOutcome::NoConfirmation
    })
}

/// Reads one chunk; a closed stream never resolves so `select!` ignores it.
async fn read_chunk<R: AsyncRead + Unpin>(
    stream: &mut Option<R>,
    buf: &mut [u8],
) -> std::io::Result<usize> {
    match stream {
        Some(reader) => reader.read(buf).await,
        None => std::future::pending().await,
    }
}

async fn confirm(stdin: &mut Option<ChildStdin>, app_name: &str) {
    let Some(writer) = stdin.as_mut() else {
        warn!(app_name, "sync tool stdin unavailable, cannot confirm");
        return;
    };
    let written = async {
        writer.write_all(b"y\n").await?;
        writer.flush().await
    }
    .await;
    if let Err(e) = written {
        warn!(app_name, error = %e, "failed to answer sync tool prompt");
    }
}

/// Kills the child and reaps it.
async fn terminate(child: &mut Child, app_name: &str) {
    if let Err(e) = child.kill().await {
        debug!(app_name, error = %e, "sync tool already gone");
    }
}
