//! Stack metadata resolution.
//!
//! The server describes each stack with a JSON "stack info" document. This
//! module turns that document into a validated [`StackMetadata`]; fetching
//! the document is the job of [`crate::dataset`].

mod error;
mod parse;
mod types;

pub use error::MetadataValidationError;
pub use parse::parse_stack_info;
pub use types::{StackIdentity, StackMetadata, Vec3, ZoomLevels, MAX_ZOOM_LEVEL};
