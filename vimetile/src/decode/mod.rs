//! Tile decoders and their registry.
//!
//! A [`DecoderRegistry`] maps each [`TileEncoding`] to a [`TileDecoder`]. It
//! is built once at startup and handed to the pipeline; supporting a new
//! encoding means registering another decoder, not changing the pipeline.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vimetile::decode::{DecoderRegistry, JpegDecoder};
//! use vimetile::tile::TileEncoding;
//!
//! let registry = DecoderRegistry::new().register(TileEncoding::Jpeg, Arc::new(JpegDecoder));
//! assert!(registry.get(TileEncoding::Jpeg).is_some());
//! ```

mod error;
mod jpeg;

pub use error::TileDecodeError;
pub use jpeg::JpegDecoder;

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;

use crate::chunk::VolumeChunk;
use crate::tile::TileEncoding;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Decodes a raw tile payload into a chunk.
///
/// The chunk arrives with its data size already stamped. Implementations
/// write the decoded samples into the chunk and leave it untouched on
/// failure.
pub trait TileDecoder: Send + Sync {
    fn decode<'a>(
        &'a self,
        payload: Bytes,
        chunk: &'a mut VolumeChunk,
    ) -> BoxFuture<'a, Result<(), TileDecodeError>>;
}

/// Mapping from tile encoding to decoder.
#[derive(Clone, Default)]
pub struct DecoderRegistry {
    decoders: HashMap<TileEncoding, Arc<dyn TileDecoder>>,
}

impl DecoderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in decoders (JPEG).
    pub fn with_defaults() -> Self {
        Self::new().register(TileEncoding::Jpeg, Arc::new(JpegDecoder::new()))
    }

    /// Registers `decoder` for `encoding`, replacing any previous one.
    pub fn register(mut self, encoding: TileEncoding, decoder: Arc<dyn TileDecoder>) -> Self {
        self.decoders.insert(encoding, decoder);
        self
    }

    /// Looks up the decoder for `encoding`.
    pub fn get(&self, encoding: TileEncoding) -> Option<&Arc<dyn TileDecoder>> {
        self.decoders.get(&encoding)
    }

    pub fn supports(&self, encoding: TileEncoding) -> bool {
        self.decoders.contains_key(&encoding)
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("encodings", &self.decoders.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) use super::jpeg::tests::grey_jpeg;

    /// Decoder that copies the payload into the chunk and counts calls.
    #[derive(Default)]
    pub(crate) struct CountingDecoder {
        pub calls: AtomicUsize,
    }

    impl TileDecoder for CountingDecoder {
        fn decode<'a>(
            &'a self,
            payload: Bytes,
            chunk: &'a mut VolumeChunk,
        ) -> BoxFuture<'a, Result<(), TileDecodeError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                chunk.write_samples(&payload);
                Ok(())
            })
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = DecoderRegistry::new();
        assert!(registry.get(TileEncoding::Jpeg).is_none());
        assert!(!registry.supports(TileEncoding::Jpeg));
    }

    #[test]
    fn test_defaults_include_jpeg() {
        let registry = DecoderRegistry::with_defaults();
        assert!(registry.supports(TileEncoding::Jpeg));
    }

    #[tokio::test]
    async fn test_registered_decoder_is_dispatched() {
        let counting = Arc::new(CountingDecoder::default());
        let registry = DecoderRegistry::with_defaults().register(TileEncoding::Jpeg, counting.clone());

        let mut chunk = VolumeChunk::new(Default::default());
        let decoder = registry.get(TileEncoding::Jpeg).unwrap();
        decoder
            .decode(Bytes::from_static(&[7, 8]), &mut chunk)
            .await
            .unwrap();

        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
        assert_eq!(chunk.data(), &[7, 8]);
    }

    #[test]
    fn test_debug_lists_encodings() {
        let registry = DecoderRegistry::with_defaults();
        assert!(format!("{:?}", registry).contains("Jpeg"));
    }
}
