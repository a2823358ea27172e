//! Tile fetch and decode pipeline.
//!
//! Downloading a chunk is a straight sequence:
//!
//! 1. stamp the chunk with its level's data size,
//! 2. build the tile path and pick a base URL,
//! 3. fetch the payload, racing the request against cancellation,
//! 4. hand the payload to the decoder registered for the stack's encoding.
//!
//! Each download owns its chunk exclusively for its whole duration and
//! shares nothing mutable with other downloads, so any number of them may
//! run concurrently. Failures are reported to the caller of that one chunk
//! and are never retried here.

use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::chunk::VolumeChunk;
use crate::decode::{DecoderRegistry, TileDecodeError};
use crate::level::LevelGeometry;
use crate::tile::{tile_path, TileEncoding, TileSourceParameters};
use crate::transport::{AsyncHttpClient, TransportError};

/// How a chunk download ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// The chunk holds decoded samples.
    Populated,
    /// Cancellation fired first; the chunk's samples were not touched.
    Cancelled,
}

/// Errors local to a single chunk download.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    /// The tile request failed.
    #[error("failed to fetch tile {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: TransportError,
    },

    /// No decoder is registered for the stack's encoding.
    #[error("no decoder registered for {0} tiles")]
    UnsupportedEncoding(TileEncoding),

    /// The decoder rejected the payload.
    #[error("failed to decode tile {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: TileDecodeError,
    },
}

/// Shared download logic used by every chunk source of a dataset.
pub struct TilePipeline<C> {
    client: Arc<C>,
    decoders: Arc<DecoderRegistry>,
}

impl<C> Clone for TilePipeline<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            decoders: Arc::clone(&self.decoders),
        }
    }
}

impl<C: AsyncHttpClient> TilePipeline<C> {
    pub fn new(client: Arc<C>, decoders: Arc<DecoderRegistry>) -> Self {
        Self { client, decoders }
    }

    /// Downloads and decodes the tile backing `chunk`.
    ///
    /// Returns [`ChunkOutcome::Cancelled`] if `cancellation` fires before the
    /// payload has arrived; the in-flight request is dropped and no decoder
    /// runs.
    pub async fn download(
        &self,
        params: &TileSourceParameters,
        spec: &LevelGeometry,
        chunk: &mut VolumeChunk,
        cancellation: &CancellationToken,
    ) -> Result<ChunkOutcome, ChunkError> {
        if cancellation.is_cancelled() {
            return Ok(ChunkOutcome::Cancelled);
        }

        // Decoders validate the payload against this size
        chunk.set_data_size(spec.chunk_data_size);

        let path = tile_path(params, chunk.grid_position());
        let url = params.base_urls.url_for(&path);
        debug!(url = %url, level = params.zoom_level, "Fetching tile");

        let payload = tokio::select! {
            biased;

            _ = cancellation.cancelled() => {
                debug!(path = %path, "Tile download cancelled");
                return Ok(ChunkOutcome::Cancelled);
            }

            result = self.client.get(&url) => result.map_err(|source| {
                warn!(path = %path, error = %source, "Tile fetch failed");
                ChunkError::Fetch { path: path.clone(), source }
            })?,
        };

        if cancellation.is_cancelled() {
            debug!(path = %path, "Tile download cancelled before decode");
            return Ok(ChunkOutcome::Cancelled);
        }

        let decoder = self
            .decoders
            .get(params.encoding)
            .ok_or(ChunkError::UnsupportedEncoding(params.encoding))?;

        decoder.decode(payload, chunk).await.map_err(|source| {
            warn!(path = %path, error = %source, "Tile decode failed");
            ChunkError::Decode {
                path: path.clone(),
                source,
            }
        })?;

        chunk.mark_populated();
        Ok(ChunkOutcome::Populated)
    }
}
