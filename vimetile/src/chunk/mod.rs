//! Volume chunks and their grid positions.
//!
//! Chunks belong to the consumer: it creates them, hands them to a chunk
//! source for the duration of one download, and decides when to drop them.
//! The download path only stamps the expected data size and writes samples.

use std::fmt;

use serde::Serialize;

use crate::stack::Vec3;

/// Sample type of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    Uint8,
}

/// Position of a chunk within a level's tile grid.
///
/// `x` is the tile column, `y` the tile row and `z` the slice index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChunkGridPosition {
    pub x: u64,
    pub y: u64,
    pub z: u64,
}

impl ChunkGridPosition {
    /// Creates a grid position from column, row and slice.
    pub const fn new(x: u64, y: u64, z: u64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for ChunkGridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.x, self.y, self.z)
    }
}

/// A chunk of 8-bit volume data being filled by a download.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeChunk {
    grid_position: ChunkGridPosition,
    data_size: Option<Vec3<u32>>,
    data: Vec<u8>,
    populated: bool,
}

impl VolumeChunk {
    /// Creates an empty, unpopulated chunk at the given grid position.
    pub fn new(grid_position: ChunkGridPosition) -> Self {
        Self {
            grid_position,
            data_size: None,
            data: Vec::new(),
            populated: false,
        }
    }

    pub fn grid_position(&self) -> ChunkGridPosition {
        self.grid_position
    }

    /// Expected per-axis size of the decoded data, once stamped.
    pub fn data_size(&self) -> Option<Vec3<u32>> {
        self.data_size
    }

    /// Stamps the expected data size. Decoders read it to validate payloads.
    pub fn set_data_size(&mut self, size: Vec3<u32>) {
        self.data_size = Some(size);
    }

    /// Number of samples implied by the stamped data size.
    pub fn sample_count(&self) -> Option<usize> {
        self.data_size
            .map(|s| s.x as usize * s.y as usize * s.z as usize)
    }

    /// Decoded samples; empty until a decoder has written them.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replaces the sample buffer contents, reusing its allocation.
    pub fn write_samples(&mut self, samples: &[u8]) {
        self.data.clear();
        self.data.extend_from_slice(samples);
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub(crate) fn mark_populated(&mut self) {
        self.populated = true;
    }

    /// Takes the sample buffer out of the chunk, leaving it empty.
    pub fn take_data(&mut self) -> Vec<u8> {
        self.populated = false;
        std::mem::take(&mut self.data)
    }
}
