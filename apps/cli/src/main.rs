//! `savesync`: prints the default save location(s) of an installed game.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use savesync_discovery::PathDiscoveryRunner;
use savesync_host::{EnvPathExpander, TokioFilesystem, WinePathTranslator};
use savesync_library::{
    GamesConfig, GogInfoFiles, Library, default_heroic_config_dir, default_legendary_config_dir,
};
use savesync_resolver::{Collaborators, SavePathResolver};
use savesync_types::{Backend, CloudSaveLocation, SavePath};

use config::Config;

#[derive(Parser)]
#[command(name = "savesync", version, about = "Save-game location resolver", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/savesync/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the default save location(s) of a game
    Resolve {
        /// App name as known to the backend
        app_name: String,

        /// Backend the game was installed with (legendary, gog)
        #[arg(short, long)]
        backend: Backend,

        /// Location already resolved by a previous run, kept as is
        #[arg(long = "resolved", value_name = "NAME=PATH", value_parser = parse_resolved)]
        resolved: Vec<CloudSaveLocation>,
    },
}

fn parse_resolved(s: &str) -> Result<CloudSaveLocation, String> {
    match s.split_once('=') {
        Some((name, path)) if !name.is_empty() => Ok(CloudSaveLocation::new(name, path)),
        _ => Err(format!("expected NAME=PATH, got '{s}'")),
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_resolver(config: &Config) -> anyhow::Result<SavePathResolver> {
    let legendary_dir = config
        .legendary_config_dir
        .clone()
        .or_else(default_legendary_config_dir)
        .context("cannot determine legendary config directory")?;
    let heroic_dir = config
        .heroic_config_dir
        .clone()
        .or_else(default_heroic_config_dir)
        .context("cannot determine launcher config directory")?;

    let discovery = PathDiscoveryRunner::new(&config.legendary_bin)
        .with_prefix_args(config.legendary_args.iter().cloned())
        .with_timeout(config.discovery_timeout());

    Ok(SavePathResolver::new(Collaborators {
        store: Arc::new(Library::new(legendary_dir, &heroic_dir)),
        settings: Arc::new(GamesConfig::new(&heroic_dir)),
        discovery: Arc::new(discovery),
        info_files: Arc::new(GogInfoFiles::new()),
        translator: Arc::new(WinePathTranslator::new()),
        expander: Arc::new(EnvPathExpander::new()),
        fs: Arc::new(TokioFilesystem::new()),
    }))
}

/// Renders the result as JSON; an empty result is still printed.
fn render(app_name: &str, save_path: &SavePath) -> anyhow::Result<String> {
    if save_path.is_empty() {
        warn!(app_name, "no save location resolved");
    }
    Ok(serde_json::to_string_pretty(save_path)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load(cli.config.as_deref());
    let filter = loaded
        .as_ref()
        .ok()
        .and_then(|c| c.log_filter.clone())
        .unwrap_or_else(|| "info,savesync=debug".into());
    init_tracing(&filter);

    let config = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        Config::default()
    });

    match cli.command {
        Commands::Resolve {
            app_name,
            backend,
            resolved,
        } => {
            let resolver = build_resolver(&config)?;
            let save_path = resolver
                .get_default_save_path(&app_name, backend, &resolved)
                .await;
            println!("{}", render(&app_name, &save_path)?);
        }
    }

    Ok(())
}
