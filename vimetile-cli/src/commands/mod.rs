//! CLI command implementations.

pub mod common;
pub mod config;
pub mod fetch;
pub mod info;
pub mod tile_path;
