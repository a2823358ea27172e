//! `tile-path` command: print the server path of one chunk's tile.

use vimetile::config::ConfigFile;

use super::common::{level_source, registry, runtime, ChunkArgs};
use crate::error::CliError;

pub fn run(config: &ConfigFile, url: &str, chunk: &ChunkArgs) -> Result<(), CliError> {
    let registry = registry(config)?;
    let dataset = runtime()?.block_on(registry.open(url))?;
    let source = level_source(&dataset, chunk.level)?;

    let path = source.tile_path(chunk.position());
    println!("{}", source.parameters().base_urls.url_for(&path));
    Ok(())
}
