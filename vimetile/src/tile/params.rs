//! Per-level tile request parameters.

use crate::stack::StackMetadata;
use crate::transport::ShardedUrls;

use super::encoding::TileEncoding;

/// Everything needed to address the tiles of one resolution level.
///
/// Immutable once built; one instance backs each chunk source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSourceParameters {
    /// Candidate base URLs the tiles may be fetched from.
    pub base_urls: ShardedUrls,
    pub encoding: TileEncoding,
    pub zoom_level: u32,
    pub render_tile_width: u32,
    pub render_tile_height: u32,
    pub iteration: u64,
    pub file_iteration: u64,
    pub stack_type: String,
    pub project_name: String,
    pub stack_name: String,
}

impl TileSourceParameters {
    /// Derives the parameters of `zoom_level` from the stack metadata.
    pub fn for_level(
        meta: &StackMetadata,
        base_urls: ShardedUrls,
        encoding: TileEncoding,
        zoom_level: u32,
    ) -> Self {
        Self {
            base_urls,
            encoding,
            zoom_level,
            render_tile_width: meta.render_tile_width,
            render_tile_height: meta.render_tile_height,
            iteration: meta.iteration,
            file_iteration: meta.file_iteration,
            stack_type: meta.stack_type.clone(),
            project_name: meta.project_name.clone(),
            stack_name: meta.stack_name.clone(),
        }
    }
}
