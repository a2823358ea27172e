//! Tile encodings.

use std::fmt;

/// Encoding of the tile payloads served for a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileEncoding {
    Jpeg,
}

impl fmt::Display for TileEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileEncoding::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// File extensions a tile path may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileFileExtension {
    Jpg,
    Jpeg,
}

impl TileFileExtension {
    pub fn as_str(self) -> &'static str {
        match self {
            TileFileExtension::Jpg => "jpg",
            TileFileExtension::Jpeg => "jpeg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_display() {
        assert_eq!(TileEncoding::Jpeg.to_string(), "JPEG");
    }

    #[test]
    fn test_extension_str() {
        assert_eq!(TileFileExtension::Jpg.as_str(), "jpg");
        assert_eq!(TileFileExtension::Jpeg.as_str(), "jpeg");
    }
}
