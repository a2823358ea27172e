//! Chunk sources exposed to the volume consumer.
//!
//! A [`MultiscaleTileSource`] wraps one opened stack. Its
//! [`sources`](MultiscaleTileSource::sources) method returns one
//! [`VolumeChunkSource`] per resolution level; each holds the level's
//! geometry, its immutable tile parameters and a handle on the shared
//! download pipeline.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::chunk::{ChunkGridPosition, DataType, VolumeChunk};
use crate::level::{max_level, plan_levels, LevelGeometry};
use crate::pipeline::{ChunkError, ChunkOutcome, TilePipeline};
use crate::stack::StackMetadata;
use crate::tile::{tile_path, TileEncoding, TileSourceParameters};
use crate::transport::{AsyncHttpClient, ShardedUrls};

/// Kind of volume a source serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeType {
    Image,
}

/// Mesh source of a stack.
///
/// Stacks never carry meshes, so this type has no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshSource {}

/// Chunk source of a single resolution level.
pub struct VolumeChunkSource<C> {
    spec: LevelGeometry,
    parameters: TileSourceParameters,
    pipeline: TilePipeline<C>,
}

impl<C> Clone for VolumeChunkSource<C> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            parameters: self.parameters.clone(),
            pipeline: self.pipeline.clone(),
        }
    }
}

impl<C: AsyncHttpClient> VolumeChunkSource<C> {
    pub fn new(
        spec: LevelGeometry,
        parameters: TileSourceParameters,
        pipeline: TilePipeline<C>,
    ) -> Self {
        Self {
            spec,
            parameters,
            pipeline,
        }
    }

    /// Geometry of the level this source serves.
    pub fn spec(&self) -> &LevelGeometry {
        &self.spec
    }

    pub fn parameters(&self) -> &TileSourceParameters {
        &self.parameters
    }

    /// Server path of the tile backing the chunk at `position`.
    pub fn tile_path(&self, position: ChunkGridPosition) -> String {
        tile_path(&self.parameters, position)
    }

    /// Downloads the tile backing `chunk` and decodes it into the chunk.
    pub async fn download(
        &self,
        chunk: &mut VolumeChunk,
        cancellation: &CancellationToken,
    ) -> Result<ChunkOutcome, ChunkError> {
        self.pipeline
            .download(&self.parameters, &self.spec, chunk, cancellation)
            .await
    }
}

/// All resolution levels of one opened stack.
pub struct MultiscaleTileSource<C> {
    base_urls: ShardedUrls,
    metadata: Arc<StackMetadata>,
    encoding: TileEncoding,
    pipeline: TilePipeline<C>,
}

impl<C: AsyncHttpClient> MultiscaleTileSource<C> {
    /// Wraps validated stack metadata. Stacks are always JPEG encoded.
    pub fn new(
        base_urls: ShardedUrls,
        metadata: Arc<StackMetadata>,
        pipeline: TilePipeline<C>,
    ) -> Self {
        Self {
            base_urls,
            metadata,
            encoding: TileEncoding::Jpeg,
            pipeline,
        }
    }

    pub fn description(&self) -> &'static str {
        "Vime"
    }

    pub fn data_type(&self) -> DataType {
        DataType::Uint8
    }

    pub fn num_channels(&self) -> u32 {
        1
    }

    pub fn volume_type(&self) -> VolumeType {
        VolumeType::Image
    }

    pub fn encoding(&self) -> TileEncoding {
        self.encoding
    }

    pub fn metadata(&self) -> &StackMetadata {
        &self.metadata
    }

    pub fn base_urls(&self) -> &ShardedUrls {
        &self.base_urls
    }

    /// Number of resolution levels.
    pub fn num_levels(&self) -> usize {
        max_level(&self.metadata) as usize + 1
    }

    /// One chunk source per level, ordered from full resolution upwards.
    pub fn sources(&self) -> Vec<VolumeChunkSource<C>> {
        plan_levels(&self.metadata)
            .into_iter()
            .map(|spec| self.source_for(spec))
            .collect()
    }

    /// The chunk source of a single level, if the stack has it.
    pub fn source(&self, level: u32) -> Option<VolumeChunkSource<C>> {
        if level > max_level(&self.metadata) {
            return None;
        }
        Some(self.source_for(LevelGeometry::for_level(&self.metadata, level)))
    }

    /// Meshes are not supported.
    pub fn mesh_source(&self) -> Option<MeshSource> {
        None
    }

    fn source_for(&self, spec: LevelGeometry) -> VolumeChunkSource<C> {
        let parameters = TileSourceParameters::for_level(
            &self.metadata,
            self.base_urls.clone(),
            self.encoding,
            spec.level,
        );
        VolumeChunkSource::new(spec, parameters, self.pipeline.clone())
    }
}
