//! Common types and utilities shared across CLI commands.

use std::path::Path;

use clap::Args;
use tracing::warn;
use vimetile::chunk::ChunkGridPosition;
use vimetile::config::{ConfigError, ConfigFile};
use vimetile::dataset::{DatasetRegistry, RegistryOptions};
use vimetile::decode::DecoderRegistry;
use vimetile::source::{MultiscaleTileSource, VolumeChunkSource};
use vimetile::transport::AsyncReqwestClient;

use crate::error::CliError;

/// Chunk address shared by `tile-path` and `fetch`.
#[derive(Debug, Clone, Args)]
pub struct ChunkArgs {
    /// Resolution level (0 is full resolution)
    #[arg(long, default_value_t = 0)]
    pub level: u32,

    /// Chunk column
    #[arg(long)]
    pub x: u64,

    /// Chunk row
    #[arg(long)]
    pub y: u64,

    /// Section index
    #[arg(long)]
    pub z: u64,
}

impl ChunkArgs {
    pub fn position(&self) -> ChunkGridPosition {
        ChunkGridPosition::new(self.x, self.y, self.z)
    }
}

/// Configuration after command line overrides.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub config: ConfigFile,
    /// Why the default config file was ignored, if it was.
    pub ignored: Option<ConfigError>,
}

impl ResolvedConfig {
    /// Log a config file that was skipped. Call once logging is up.
    pub fn report_ignored(&self) {
        if let Some(ref e) = self.ignored {
            warn!(error = %e, "Ignoring unusable config file, using defaults");
        }
    }
}

/// Load the configuration and apply command line overrides.
///
/// An explicit `--config` path must load cleanly. A broken file at the
/// default location is replaced by the defaults and reported in
/// [`ResolvedConfig::ignored`].
pub fn resolve_config(
    path: Option<&Path>,
    timeout: Option<u64>,
    verbose: bool,
) -> Result<ResolvedConfig, CliError> {
    let (mut config, ignored) = match path {
        Some(path) => (
            ConfigFile::load_from(path).map_err(|e| CliError::Config(e.to_string()))?,
            None,
        ),
        None => or_default_config(ConfigFile::load()),
    };

    // CLI takes precedence over the file
    if let Some(secs) = timeout {
        config = config.with_timeout(secs);
    }
    if verbose {
        config = config.with_log_level("debug");
    }
    Ok(ResolvedConfig { config, ignored })
}

fn or_default_config(
    loaded: Result<ConfigFile, ConfigError>,
) -> (ConfigFile, Option<ConfigError>) {
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (ConfigFile::default(), Some(e)),
    }
}

/// Build a registry from the configuration.
pub fn registry(config: &ConfigFile) -> Result<DatasetRegistry<AsyncReqwestClient>, CliError> {
    let client = config
        .http_client()
        .map_err(|e| CliError::Runtime(e.to_string()))?;
    let options: RegistryOptions = config.registry_options();
    Ok(DatasetRegistry::with_options(
        client,
        DecoderRegistry::with_defaults(),
        options,
    ))
}

/// Look up a level, reporting the valid range when it is missing.
pub fn level_source(
    dataset: &MultiscaleTileSource<AsyncReqwestClient>,
    level: u32,
) -> Result<VolumeChunkSource<AsyncReqwestClient>, CliError> {
    dataset.source(level).ok_or(CliError::LevelOutOfRange {
        level,
        levels: dataset.num_levels(),
    })
}

/// Build the single-threaded runtime commands run on.
pub fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))
}
