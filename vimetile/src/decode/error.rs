//! Error types for tile decoding.

use thiserror::Error;

/// Errors raised by a tile decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileDecodeError {
    /// The chunk was handed to the decoder without a stamped data size.
    #[error("chunk has no data size")]
    MissingDataSize,

    /// The payload is not a valid image of the declared encoding.
    #[error("corrupt tile payload: {0}")]
    Corrupt(String),

    /// The decoded image does not match the chunk's data size.
    #[error("decoded tile is {width}x{height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    /// The blocking decode task panicked or was aborted.
    #[error("decode task failed: {0}")]
    Join(String),
}
