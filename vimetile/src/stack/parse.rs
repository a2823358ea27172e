//! Validation of the raw stack info JSON.

use serde_json::{Map, Value};

use super::error::MetadataValidationError;
use super::types::{StackMetadata, Vec3, ZoomLevels, MAX_ZOOM_LEVEL};

type Result<T> = std::result::Result<T, MetadataValidationError>;

/// Validates a stack info object into [`StackMetadata`].
///
/// Every field is required. Integer fields accept only JSON integers, float
/// fields accept any finite JSON number, and string fields accept only
/// strings. The first offending field is reported.
pub fn parse_stack_info(value: &Value) -> Result<StackMetadata> {
    let obj = value
        .as_object()
        .ok_or_else(|| MetadataValidationError::new("<root>", "expected an object"))?;

    let dimension = vec3(obj, "dimension", unsigned)?;
    let translation = vec3(obj, "translation", signed)?;
    let resolution = vec3(obj, "resolution", float)?;

    let raw_zoom = signed(field(obj, "num_zoom_levels")?, "num_zoom_levels")?;
    let zoom_levels = ZoomLevels::from_raw(raw_zoom).ok_or_else(|| {
        MetadataValidationError::new(
            "num_zoom_levels",
            format!(
                "expected -1 or a level count up to {}, got {}",
                MAX_ZOOM_LEVEL, raw_zoom
            ),
        )
    })?;

    let render_tile_height = tile_extent(obj, "render_tile_height")?;
    let render_tile_width = tile_extent(obj, "render_tile_width")?;

    let overlap_max = unsigned(field(obj, "overlap_max")?, "overlap_max")?;
    let grid_nr = unsigned(field(obj, "grid_nr")?, "grid_nr")?;
    let iteration = unsigned(field(obj, "iteration")?, "iteration")?;
    let file_iteration = unsigned(field(obj, "file_iteration")?, "file_iteration")?;

    let project_name = string(field(obj, "project_name")?, "project_name")?;
    let stack_name = string(field(obj, "stack_name")?, "stack_name")?;
    let stack_type = string(field(obj, "type")?, "type")?;

    Ok(StackMetadata {
        dimension,
        translation,
        resolution,
        zoom_levels,
        render_tile_width,
        render_tile_height,
        overlap_max,
        grid_nr,
        iteration,
        file_iteration,
        project_name,
        stack_name,
        stack_type,
    })
}

fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Result<&'a Value> {
    obj.get(name)
        .ok_or_else(|| MetadataValidationError::missing(name))
}

fn vec3<T>(
    obj: &Map<String, Value>,
    name: &str,
    verify: fn(&Value, &str) -> Result<T>,
) -> Result<Vec3<T>> {
    let inner = field(obj, name)?
        .as_object()
        .ok_or_else(|| MetadataValidationError::new(name, "expected an object"))?;

    let axis = |axis: &str| -> Result<T> {
        let path = format!("{}.{}", name, axis);
        let value = inner
            .get(axis)
            .ok_or_else(|| MetadataValidationError::missing(path.as_str()))?;
        verify(value, &path)
    };

    Ok(Vec3::new(axis("x")?, axis("y")?, axis("z")?))
}

fn signed(value: &Value, name: &str) -> Result<i64> {
    value.as_i64().ok_or_else(|| {
        MetadataValidationError::new(name, format!("expected an integer, got {}", value))
    })
}

fn unsigned(value: &Value, name: &str) -> Result<u64> {
    let n = signed(value, name)?;
    u64::try_from(n).map_err(|_| {
        MetadataValidationError::new(name, format!("expected a non-negative integer, got {}", n))
    })
}

fn float(value: &Value, name: &str) -> Result<f64> {
    let n = value.as_f64().ok_or_else(|| {
        MetadataValidationError::new(name, format!("expected a number, got {}", value))
    })?;
    if !n.is_finite() {
        return Err(MetadataValidationError::new(name, "expected a finite number"));
    }
    Ok(n)
}

fn string(value: &Value, name: &str) -> Result<String> {
    value.as_str().map(str::to_owned).ok_or_else(|| {
        MetadataValidationError::new(name, format!("expected a string, got {}", value))
    })
}

/// Tile extents must be positive; a zero-sized tile cannot be requested.
fn tile_extent(obj: &Map<String, Value>, name: &str) -> Result<u32> {
    let n = unsigned(field(obj, name)?, name)?;
    match u32::try_from(n) {
        Ok(px) if px > 0 => Ok(px),
        _ => Err(MetadataValidationError::new(
            name,
            format!("expected a positive pixel count, got {}", n),
        )),
    }
}
