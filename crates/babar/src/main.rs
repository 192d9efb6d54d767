mod daemon;

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

use babar_core::config::read_json;
use babar_core::{BarError, BarSettings, ConfigPaths, FavoritesConfig, WorkspaceNames};

#[derive(Parser)]
#[command(name = "babar")]
#[command(about = "Workspace and task bar for a Hyprland panel")]
#[command(version)]
struct Cli {
    /// Log debug output from the bar crates
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read configuration from this directory instead of ~/.config/babar
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the panel (default)
    Run,
    /// Print the default settings as JSON
    PrintConfig,
    /// Parse the configuration files and report errors
    CheckConfig,
    /// Write default settings and an empty favorites list
    InitConfig {
        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("babar={level}").parse()?)
                .add_directive(format!("babar_core={level}").parse()?)
                .add_directive(format!("babar_components={level}").parse()?)
                .add_directive("hyprland=warn".parse()?),
        )
        .init();

    let paths = match &cli.config_dir {
        Some(dir) => ConfigPaths::in_dir(dir),
        None => ConfigPaths::new(),
    };

    match cli.command {
        Some(Command::Run) | None => {
            info!("Starting BaBar");
            daemon::run(paths)
        }
        Some(Command::PrintConfig) => {
            println!("{}", serde_json::to_string_pretty(&BarSettings::default())?);
            Ok(())
        }
        Some(Command::CheckConfig) => check_config(&paths),
        Some(Command::InitConfig { force }) => init_config(&paths, force),
    }
}

/// Outcome of checking one config file
#[derive(Debug, PartialEq, Eq)]
enum FileStatus {
    Valid,
    Missing,
    Invalid(String),
}

fn check_file<T: DeserializeOwned>(path: &Path) -> FileStatus {
    match read_json::<T>(path) {
        Ok(_) => FileStatus::Valid,
        Err(BarError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            FileStatus::Missing
        }
        Err(e) => FileStatus::Invalid(e.to_string()),
    }
}

fn check_config(paths: &ConfigPaths) -> anyhow::Result<()> {
    let results = [
        (&paths.settings, check_file::<BarSettings>(&paths.settings)),
        (&paths.workspace_names, check_file::<WorkspaceNames>(&paths.workspace_names)),
        (&paths.favorites, check_file::<FavoritesConfig>(&paths.favorites)),
    ];

    let mut failed = 0;
    for (path, status) in &results {
        match status {
            FileStatus::Valid => println!("ok       {}", path.display()),
            FileStatus::Missing => println!("missing  {} (defaults apply)", path.display()),
            FileStatus::Invalid(e) => {
                failed += 1;
                println!("invalid  {}", e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} configuration file(s) are invalid", failed);
    }
    Ok(())
}

fn init_config(paths: &ConfigPaths, force: bool) -> anyhow::Result<()> {
    if force || !paths.settings.exists() {
        BarSettings::default().save_to(&paths.settings)?;
        println!("wrote    {}", paths.settings.display());
    } else {
        println!("kept     {}", paths.settings.display());
    }

    if force || !paths.favorites.exists() {
        FavoritesConfig::default().save(&paths.favorites)?;
        println!("wrote    {}", paths.favorites.display());
    } else {
        println!("kept     {}", paths.favorites.display());
    }
    Ok(())
}
