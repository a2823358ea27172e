//! Resolution level planning.
//!
//! Level 0 is the full-resolution tile plane. Each further level halves the
//! XY resolution; slices are never subsampled, so the Z voxel size is the
//! same on every level.
//!
//! Voxel bounds are always expressed in base-resolution voxels: every level
//! reports the full stack dimension as its upper bound.

use serde::Serialize;

use crate::chunk::DataType;
use crate::stack::{StackMetadata, Vec3, ZoomLevels};

/// XY extent below which the automatically derived pyramid stops.
pub const AUTO_LEVEL_EXTENT: f64 = 1024.0;

/// Chunk geometry of one resolution level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelGeometry {
    pub level: u32,
    /// Physical size of one voxel at this level.
    pub voxel_size: Vec3<f64>,
    /// Size of one chunk in voxels; one tile by one slice.
    pub chunk_data_size: Vec3<u32>,
    pub lower_voxel_bound: Vec3<u64>,
    pub upper_voxel_bound: Vec3<u64>,
    pub num_channels: u32,
    pub data_type: DataType,
}

impl LevelGeometry {
    /// Builds the geometry of a single level.
    pub fn for_level(meta: &StackMetadata, level: u32) -> Self {
        let scale = 2f64.powi(level as i32);
        Self {
            level,
            voxel_size: Vec3::new(
                meta.resolution.x * scale,
                meta.resolution.y * scale,
                meta.resolution.z,
            ),
            chunk_data_size: Vec3::new(meta.render_tile_width, meta.render_tile_height, 1),
            lower_voxel_bound: Vec3::new(0, 0, 0),
            upper_voxel_bound: meta.dimension,
            num_channels: 1,
            data_type: DataType::Uint8,
        }
    }
}

/// Highest level index of the stack's pyramid.
///
/// With automatic zoom levels this is the number of halvings after which the
/// larger XY extent is at most [`AUTO_LEVEL_EXTENT`], never less than zero.
pub fn max_level(meta: &StackMetadata) -> u32 {
    match meta.zoom_levels {
        ZoomLevels::Fixed(n) => n,
        ZoomLevels::Auto => {
            let halvings = |extent: u64| (extent as f64 / AUTO_LEVEL_EXTENT).log2();
            let derived = halvings(meta.dimension.x)
                .max(halvings(meta.dimension.y))
                .ceil();
            // NaN and negative infinity (zero extent) both clamp to level 0
            if derived.is_nan() || derived <= 0.0 {
                0
            } else {
                derived as u32
            }
        }
    }
}

/// Plans all levels of the stack, ordered from full resolution upwards.
///
/// Always returns `max_level(meta) + 1` entries.
pub fn plan_levels(meta: &StackMetadata) -> Vec<LevelGeometry> {
    (0..=max_level(meta))
        .map(|level| LevelGeometry::for_level(meta, level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::fixtures::sample_metadata;
    use crate::stack::MAX_ZOOM_LEVEL;
    use proptest::prelude::*;

    fn with_dimension(x: u64, y: u64) -> StackMetadata {
        let mut meta = sample_metadata();
        meta.dimension = Vec3::new(x, y, 17);
        meta.zoom_levels = ZoomLevels::Auto;
        meta
    }

    #[test]
    fn test_auto_levels_2048() {
        let meta = with_dimension(2048, 2048);
        assert_eq!(max_level(&meta), 1);
        assert_eq!(plan_levels(&meta).len(), 2);
    }

    #[test]
    fn test_auto_levels_1024_yields_single_level() {
        let meta = with_dimension(1024, 1024);
        assert_eq!(max_level(&meta), 0);
        assert_eq!(plan_levels(&meta).len(), 1);
    }

    #[test]
    fn test_auto_levels_small_stack_clamps_to_zero() {
        let meta = with_dimension(100, 300);
        assert_eq!(max_level(&meta), 0);
    }

    #[test]
    fn test_auto_levels_zero_extent_clamps_to_zero() {
        let meta = with_dimension(0, 0);
        assert_eq!(max_level(&meta), 0);
    }

    #[test]
    fn test_auto_levels_uses_larger_extent() {
        // 5000 / 1024 needs 3 halvings; 1500 would need only 1
        let meta = with_dimension(1500, 5000);
        assert_eq!(max_level(&meta), 3);
    }

    #[test]
    fn test_fixed_levels() {
        let mut meta = sample_metadata();
        meta.zoom_levels = ZoomLevels::Fixed(4);
        let levels = plan_levels(&meta);

        assert_eq!(levels.len(), 5);
        for (i, geometry) in levels.iter().enumerate() {
            assert_eq!(geometry.level, i as u32);
        }
    }

    #[test]
    fn test_level_geometry() {
        let meta = sample_metadata();
        let geometry = LevelGeometry::for_level(&meta, 2);

        assert_eq!(geometry.voxel_size, Vec3::new(16.0, 16.0, 40.0));
        assert_eq!(geometry.chunk_data_size, Vec3::new(256, 256, 1));
        assert_eq!(geometry.lower_voxel_bound, Vec3::new(0, 0, 0));
        assert_eq!(geometry.upper_voxel_bound, meta.dimension);
        assert_eq!(geometry.num_channels, 1);
        assert_eq!(geometry.data_type, DataType::Uint8);
    }

    #[test]
    fn test_highest_accepted_level_has_finite_scale() {
        let mut meta = sample_metadata();
        meta.zoom_levels = ZoomLevels::Fixed(MAX_ZOOM_LEVEL);
        let levels = plan_levels(&meta);
        let top = levels.last().unwrap();

        assert_eq!(levels.len(), MAX_ZOOM_LEVEL as usize + 1);
        assert!(top.voxel_size.x.is_finite() && top.voxel_size.y.is_finite());
        assert_eq!(top.voxel_size.x, meta.resolution.x * 2f64.powi(MAX_ZOOM_LEVEL as i32));
        assert_eq!(top.voxel_size.z, meta.resolution.z);
    }

    proptest! {
        #[test]
        fn prop_fixed_levels_count(k in 0u32..32) {
            let mut meta = sample_metadata();
            meta.zoom_levels = ZoomLevels::Fixed(k);
            let levels = plan_levels(&meta);

            prop_assert_eq!(levels.len(), k as usize + 1);
            prop_assert_eq!(levels.last().map(|g| g.level), Some(k));
        }

        #[test]
        fn prop_voxel_size_scales_xy_only(
            level in 0u32..20,
            rx in 0.1f64..100.0,
            ry in 0.1f64..100.0,
            rz in 0.1f64..100.0,
        ) {
            let mut meta = sample_metadata();
            meta.resolution = Vec3::new(rx, ry, rz);
            let geometry = LevelGeometry::for_level(&meta, level);
            let scale = 2f64.powi(level as i32);

            prop_assert_eq!(geometry.voxel_size.x, rx * scale);
            prop_assert_eq!(geometry.voxel_size.y, ry * scale);
            prop_assert_eq!(geometry.voxel_size.z, rz);
            prop_assert_eq!(geometry.upper_voxel_bound, meta.dimension);
        }

        #[test]
        fn prop_auto_levels_reach_target_extent(x in 1u64..1_000_000, y in 1u64..1_000_000) {
            let meta = with_dimension(x, y);
            let top = max_level(&meta);
            let largest = x.max(y) as f64;

            prop_assert!(largest / 2f64.powi(top as i32) <= AUTO_LEVEL_EXTENT);
            if top > 0 {
                prop_assert!(largest / 2f64.powi(top as i32 - 1) > AUTO_LEVEL_EXTENT);
            }
        }
    }
}
