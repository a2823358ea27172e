//! Configuration CLI commands.

use clap::Subcommand;
use vimetile::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Show the configuration file path
    Path,

    /// Write the default configuration file if none exists
    Init,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, config: &ConfigFile) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => {
            run_show(config);
            Ok(())
        }
        ConfigCommands::Path => run_path(),
        ConfigCommands::Init => run_init(),
    }
}

fn run_show(config: &ConfigFile) {
    println!("[http]");
    println!("timeout = {}", config.http.timeout);
    println!("user_agent = {}", config.http.user_agent);
    println!("mirrors = {}", config.http.mirrors.join(", "));
    println!();
    println!("[cache]");
    println!("max_stacks = {}", config.cache.max_stacks);
    println!();
    println!("[logging]");
    println!("level = {}", config.logging.level);
    if let Some(ref dir) = config.logging.directory {
        println!("directory = {}", dir.display());
    }
}

fn run_path() -> Result<(), CliError> {
    let path = config_file_path()
        .ok_or_else(|| CliError::Config("Could not determine home directory".to_string()))?;
    println!("{}", path.display());
    Ok(())
}

fn run_init() -> Result<(), CliError> {
    let path = config_file_path()
        .ok_or_else(|| CliError::Config("Could not determine home directory".to_string()))?;
    if path.exists() {
        println!("Config file already exists: {}", path.display());
        return Ok(());
    }
    ConfigFile::default()
        .save_to(&path)
        .map_err(|e| CliError::Config(e.to_string()))?;
    println!("Created {}", path.display());
    Ok(())
}
