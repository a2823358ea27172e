//! JPEG tile decoder.
//!
//! Tiles are single-channel: colour JPEGs are converted to 8-bit luma. A tile
//! covers `data_size.z` slices stacked vertically, so the image must be
//! `data_size.x` wide and `data_size.y * data_size.z` high.

use bytes::Bytes;
use image::ImageFormat;

use crate::chunk::VolumeChunk;
use crate::stack::Vec3;

use super::error::TileDecodeError;
use super::{BoxFuture, TileDecoder};

/// Decodes JPEG tiles into 8-bit luma samples.
///
/// Decoding runs on tokio's blocking pool so that large tiles do not stall
/// other downloads sharing the runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegDecoder;

impl JpegDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl TileDecoder for JpegDecoder {
    fn decode<'a>(
        &'a self,
        payload: Bytes,
        chunk: &'a mut VolumeChunk,
    ) -> BoxFuture<'a, Result<(), TileDecodeError>> {
        Box::pin(async move {
            let size = chunk.data_size().ok_or(TileDecodeError::MissingDataSize)?;

            let samples = tokio::task::spawn_blocking(move || decode_luma(&payload, size))
                .await
                .map_err(|e| TileDecodeError::Join(e.to_string()))??;

            chunk.write_samples(&samples);
            Ok(())
        })
    }
}

/// Decodes `payload` and checks it against the expected chunk size.
pub(crate) fn decode_luma(payload: &[u8], size: Vec3<u32>) -> Result<Vec<u8>, TileDecodeError> {
    let image = image::load_from_memory_with_format(payload, ImageFormat::Jpeg)
        .map_err(|e| TileDecodeError::Corrupt(e.to_string()))?;
    let luma = image.into_luma8();

    let expected_width = size.x;
    let expected_height = size.y.saturating_mul(size.z);
    if luma.width() != expected_width || luma.height() != expected_height {
        return Err(TileDecodeError::DimensionMismatch {
            width: luma.width(),
            height: luma.height(),
            expected_width,
            expected_height,
        });
    }

    Ok(luma.into_raw())
}
