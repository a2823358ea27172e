//! Typed stack metadata.

use std::fmt;

use serde::Serialize;

/// A value per spatial axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Vec3<T> {
    /// Creates a new triple.
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: fmt::Display> fmt::Display for Vec3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Highest fixed zoom level accepted from a stack info document.
///
/// Level `L` scales voxel sizes by `2^L`; past this the scale no longer
/// describes a real pyramid.
pub const MAX_ZOOM_LEVEL: u32 = 63;

/// Number of zoom levels reported by the server.
///
/// The stack info encodes "derive it from the stack size" as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ZoomLevels {
    /// Derive the level count from the XY extent of the stack.
    Auto,
    /// The highest zoom level index.
    Fixed(u32),
}

impl ZoomLevels {
    /// Interprets the raw `num_zoom_levels` value.
    ///
    /// Returns `None` for values below the `-1` sentinel or above
    /// [`MAX_ZOOM_LEVEL`].
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            -1 => Some(ZoomLevels::Auto),
            n if n >= 0 => u32::try_from(n)
                .ok()
                .filter(|&level| level <= MAX_ZOOM_LEVEL)
                .map(ZoomLevels::Fixed),
            _ => None,
        }
    }
}

/// Validated metadata of a single stack.
///
/// Built once per stack identity by [`super::parse_stack_info`] and never
/// mutated afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackMetadata {
    /// Stack extent in base-resolution voxels.
    pub dimension: Vec3<u64>,
    /// Offset of the stack in voxels.
    ///
    /// Signed: servers report stacks placed left of or above the origin
    /// with negative offsets, and these are accepted as-is.
    pub translation: Vec3<i64>,
    /// Physical size of one base-resolution voxel.
    pub resolution: Vec3<f64>,
    pub zoom_levels: ZoomLevels,
    /// Tile width in pixels, always non-zero.
    pub render_tile_width: u32,
    /// Tile height in pixels, always non-zero.
    pub render_tile_height: u32,
    pub overlap_max: u64,
    pub grid_nr: u64,
    pub iteration: u64,
    pub file_iteration: u64,
    pub project_name: String,
    pub stack_name: String,
    pub stack_type: String,
}

/// Identity under which stack metadata is fetched and memoized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackIdentity {
    /// Base URL of the server, e.g. `https://vime.example.org`.
    pub base_url: String,
    pub project_name: String,
    pub stack_name: String,
    pub stack_type: String,
    pub iteration: u64,
    pub file_iteration: u64,
}

impl fmt::Display for StackIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}/{}/{}@{}.{}",
            self.base_url,
            self.project_name,
            self.stack_name,
            self.stack_type,
            self.iteration,
            self.file_iteration
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_levels_sentinel() {
        assert_eq!(ZoomLevels::from_raw(-1), Some(ZoomLevels::Auto));
    }

    #[test]
    fn test_zoom_levels_fixed() {
        assert_eq!(ZoomLevels::from_raw(0), Some(ZoomLevels::Fixed(0)));
        assert_eq!(ZoomLevels::from_raw(7), Some(ZoomLevels::Fixed(7)));
    }

    #[test]
    fn test_zoom_levels_out_of_range() {
        assert_eq!(ZoomLevels::from_raw(-2), None);
        assert_eq!(ZoomLevels::from_raw(i64::from(u32::MAX) + 1), None);
        assert_eq!(ZoomLevels::from_raw(i64::from(u32::MAX)), None);
        assert_eq!(ZoomLevels::from_raw(64), None);
    }

    #[test]
    fn test_zoom_levels_cap_is_inclusive() {
        assert_eq!(
            ZoomLevels::from_raw(i64::from(MAX_ZOOM_LEVEL)),
            Some(ZoomLevels::Fixed(MAX_ZOOM_LEVEL))
        );
    }

    #[test]
    fn test_vec3_display() {
        assert_eq!(Vec3::new(1, 2, 3).to_string(), "(1, 2, 3)");
    }

    #[test]
    fn test_identity_display() {
        let identity = StackIdentity {
            base_url: "http://host".to_string(),
            project_name: "p1".to_string(),
            stack_name: "s1".to_string(),
            stack_type: "raw".to_string(),
            iteration: 3,
            file_iteration: 0,
        };
        assert_eq!(identity.to_string(), "http://host:p1/s1/raw@3.0");
    }
}
