//! Tile addressing.
//!
//! Maps a chunk's grid position on a resolution level to the server path of
//! the tile backing it. Path construction is pure and never fails.

mod encoding;
mod params;
mod path;

pub use encoding::{TileEncoding, TileFileExtension};
pub use params::TileSourceParameters;
pub use path::{stack_info_path, tile_path};
