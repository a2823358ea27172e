//! vimetile CLI - inspect and fetch tiles from VIME image stacks.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vimetile::logging;

use commands::common::{resolve_config, ChunkArgs};
use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "vimetile", version, about = "Inspect and fetch tiles from VIME image stacks")]
struct Cli {
    /// Configuration file (defaults to ~/.vimetile/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show stack metadata and the resolution levels
    Info {
        /// Dataset connection string
        url: String,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the tile URL backing a chunk
    TilePath {
        /// Dataset connection string
        url: String,

        #[command(flatten)]
        chunk: ChunkArgs,
    },

    /// Download one chunk and write its raw 8-bit samples
    Fetch {
        /// Dataset connection string
        url: String,

        #[command(flatten)]
        chunk: ChunkArgs,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let resolved = resolve_config(cli.config.as_deref(), cli.timeout, cli.verbose)?;
    let _log_guard =
        logging::init(&resolved.config.logging).map_err(|e| CliError::Logging(e.to_string()))?;
    resolved.report_ignored();
    let config = resolved.config;

    match cli.command {
        Commands::Info { url, json } => commands::info::run(&config, &url, json),
        Commands::TilePath { url, chunk } => commands::tile_path::run(&config, &url, &chunk),
        Commands::Fetch { url, chunk, output } => {
            commands::fetch::run(&config, &url, &chunk, &output)
        }
        Commands::Config { command } => commands::config::run(command, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fetch_arguments() {
        let cli = Cli::try_parse_from([
            "vimetile",
            "--timeout",
            "5",
            "fetch",
            "http://host/project/p/stack/s/type/raw/0/0",
            "--level",
            "2",
            "--x",
            "3",
            "--y",
            "4",
            "--z",
            "5",
            "-o",
            "chunk.raw",
        ])
        .unwrap();

        assert_eq!(cli.timeout, Some(5));
        match cli.command {
            Commands::Fetch { chunk, output, .. } => {
                assert_eq!(chunk.level, 2);
                assert_eq!(chunk.position().to_string(), "3/4/5");
                assert_eq!(output, PathBuf::from("chunk.raw"));
            }
            other => panic!("Expected Fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vimetile", "info", "http://h/x", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_tile_path_requires_coordinates() {
        let result = Cli::try_parse_from(["vimetile", "tile-path", "http://h/x", "--x", "1"]);
        assert!(result.is_err());
    }
}
