//! Citymesh CLI - Command-line interface
//!
//! This binary provides a command-line interface to the citymesh library:
//! the `map` command runs the tile-union pipeline against a vector-tile
//! server, and the `physics` command spawns SVG outlines into a headless
//! rigid-body simulation.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use citymesh::config::ConfigFile;
use citymesh::logging;

mod commands;
mod error;

use error::CliError;

#[derive(Parser)]
#[command(name = "citymesh")]
#[command(about = "Building-footprint map and physics pipelines", long_about = None)]
#[command(version = citymesh::VERSION)]
struct Cli {
    /// Path to an INI config file (defaults apply if omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, merge, and render building tiles
    Map(commands::map::MapArgs),
    /// Spawn SVG outlines into a physics world and simulate
    Physics(commands::physics::PhysicsArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _guard =
        match logging::init_logging(logging::default_log_dir(), logging::default_log_file()) {
            Ok(guard) => guard,
            Err(e) => CliError::LoggingInit(e.to_string()).exit(),
        };

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    let result = match cli.command {
        Command::Map(args) => commands::map::run(args, &config).await,
        Command::Physics(args) => commands::physics::run(args, &config).await,
    };

    if let Err(e) = result {
        e.exit();
    }
}

fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    match path {
        Some(path) => {
            citymesh::config::load_config(path).map_err(|e| CliError::Config(e.to_string()))
        }
        None => Ok(ConfigFile::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_config_path_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("citymesh.ini");
        std::fs::write(&path, "[physics]\nbatch_size = 12\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.physics.batch_size, 12);
    }

    #[test]
    fn test_unreadable_config_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/citymesh.ini")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
