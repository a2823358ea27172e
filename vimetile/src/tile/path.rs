//! Tile and stack info path construction.
//!
//! # Tile Path Grammar
//!
//! ```text
//! /project/{project}/stack/{stack}/neuroglancer/type/{type}
//!     /iteration/{iteration}/file_iteration/{file_iteration}
//!     /{tile_width}/{tile_height}/{zoom_level}/{slice}/{row}/{column}.jpg
//! ```
//!
//! The grid position appears as slice, row, column, i.e. `z/y/x`. This is a
//! wire contract with the tile server.

use crate::chunk::ChunkGridPosition;
use crate::stack::StackIdentity;

use super::encoding::TileFileExtension;
use super::params::TileSourceParameters;

/// Builds the server-relative path of the tile backing a chunk.
pub fn tile_path(params: &TileSourceParameters, position: ChunkGridPosition) -> String {
    format!(
        "/project/{}/stack/{}/neuroglancer/type/{}/iteration/{}/file_iteration/{}/{}/{}/{}/{}/{}/{}.{}",
        params.project_name,
        params.stack_name,
        params.stack_type,
        params.iteration,
        params.file_iteration,
        params.render_tile_width,
        params.render_tile_height,
        params.zoom_level,
        position.z,
        position.y,
        position.x,
        TileFileExtension::Jpg.as_str(),
    )
}

/// Builds the server-relative path of a stack's info document.
pub fn stack_info_path(identity: &StackIdentity) -> String {
    format!(
        "/project/{}/stack/{}/type/{}/{}/{}/stackinfo",
        identity.project_name,
        identity.stack_name,
        identity.stack_type,
        identity.iteration,
        identity.file_iteration,
    )
}
