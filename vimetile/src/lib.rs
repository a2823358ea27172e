//! vimetile - Multiscale tile addressing and retrieval for VIME image stacks
//!
//! A VIME stack is a 3D image volume served as a pyramid of 2D JPEG tiles.
//! This library resolves such a stack into per-level chunk sources that a
//! volume-rendering consumer can pull chunks from:
//!
//! 1. [`dataset`] parses the connection string and fetches the stack info
//!    (memoized per stack identity).
//! 2. [`stack`] validates the stack info into [`stack::StackMetadata`].
//! 3. [`level`] plans the resolution levels.
//! 4. [`tile`] builds the server path of each tile.
//! 5. [`pipeline`] fetches a tile and hands it to the [`decode`] registry.
//!
//! # Example
//!
//! ```ignore
//! use tokio_util::sync::CancellationToken;
//! use vimetile::chunk::{ChunkGridPosition, VolumeChunk};
//! use vimetile::dataset::DatasetRegistry;
//! use vimetile::transport::AsyncReqwestClient;
//!
//! let registry = DatasetRegistry::new(AsyncReqwestClient::new()?);
//! let dataset = registry
//!     .open("https://vime.example.org/project/p1/stack/s1/type/raw/3/0")
//!     .await?;
//!
//! let sources = dataset.sources();
//! let mut chunk = VolumeChunk::new(ChunkGridPosition::new(5, 4, 1));
//! sources[2].download(&mut chunk, &CancellationToken::new()).await?;
//! ```

pub mod chunk;
pub mod config;
pub mod dataset;
pub mod decode;
pub mod level;
pub mod logging;
pub mod pipeline;
pub mod source;
pub mod stack;
pub mod tile;
pub mod transport;

/// Library version, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
