//! `fetch` command: download one chunk and write its raw samples.
//!
//! Ctrl-C cancels the in-flight download instead of killing the process, so
//! a partially received tile is never written.

use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use vimetile::chunk::VolumeChunk;
use vimetile::config::ConfigFile;
use vimetile::pipeline::ChunkOutcome;

use super::common::{level_source, registry, runtime, ChunkArgs};
use crate::error::CliError;

pub fn run(config: &ConfigFile, url: &str, chunk: &ChunkArgs, output: &Path) -> Result<(), CliError> {
    let cancellation = CancellationToken::new();
    let handler_token = cancellation.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("\nCancelling download...");
        handler_token.cancel();
    }) {
        warn!(error = %e, "Failed to install Ctrl-C handler");
    }

    let registry = registry(config)?;
    let rt = runtime()?;

    let (outcome, volume_chunk) = rt.block_on(async {
        let dataset = registry.open(url).await?;
        let source = level_source(&dataset, chunk.level)?;
        let mut volume_chunk = VolumeChunk::new(chunk.position());
        let outcome = source.download(&mut volume_chunk, &cancellation).await?;
        Ok::<_, CliError>((outcome, volume_chunk))
    })?;

    if outcome == ChunkOutcome::Cancelled {
        return Err(CliError::Cancelled);
    }

    std::fs::write(output, volume_chunk.data()).map_err(|e| CliError::Output {
        path: output.to_path_buf(),
        reason: e.to_string(),
    })?;

    let size = volume_chunk
        .data_size()
        .map(|s| s.to_string())
        .unwrap_or_default();
    info!(path = %output.display(), bytes = volume_chunk.data().len(), "Wrote chunk");
    println!(
        "Wrote {} samples {} to {}",
        volume_chunk.data().len(),
        size,
        output.display()
    );
    Ok(())
}
