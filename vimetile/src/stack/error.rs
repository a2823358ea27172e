//! Stack info validation errors.

use thiserror::Error;

/// A stack info field is missing or malformed.
///
/// `field` names the offending descriptor field using its wire name; fields
/// nested in a vector are named `dimension.x`, `resolution.z`, etc. The root
/// object itself is named `<root>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid stack info field `{field}`: {reason}")]
pub struct MetadataValidationError {
    pub field: String,
    pub reason: String,
}

impl MetadataValidationError {
    pub(crate) fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "missing")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = MetadataValidationError::missing("render_tile_width");
        assert_eq!(
            err.to_string(),
            "invalid stack info field `render_tile_width`: missing"
        );
    }
}
