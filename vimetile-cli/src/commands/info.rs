//! `info` command: print stack metadata and the level table.

use vimetile::config::ConfigFile;

use super::common::{registry, runtime};
use crate::error::CliError;

pub fn run(config: &ConfigFile, url: &str, json: bool) -> Result<(), CliError> {
    let registry = registry(config)?;
    let dataset = runtime()?.block_on(registry.open(url))?;
    let meta = dataset.metadata();

    if json {
        let levels: Vec<_> = dataset.sources().iter().map(|s| s.spec().clone()).collect();
        let report = serde_json::json!({
            "description": dataset.description(),
            "metadata": meta,
            "levels": levels,
        });
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::Runtime(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    println!("{} stack {}/{}", dataset.description(), meta.project_name, meta.stack_name);
    println!("  Type:        {}", meta.stack_type);
    println!("  Iteration:   {} (file {})", meta.iteration, meta.file_iteration);
    println!("  Dimension:   {}", meta.dimension);
    println!("  Translation: {}", meta.translation);
    println!("  Resolution:  {}", meta.resolution);
    println!(
        "  Tiles:       {}x{} {}",
        meta.render_tile_width,
        meta.render_tile_height,
        dataset.encoding()
    );
    println!("  Servers:     {}", dataset.base_urls().urls().join(", "));
    println!();
    println!("{:>5}  {:<28}  {:<14}  {}", "Level", "Voxel size", "Chunk size", "Bounds");

    for source in dataset.sources() {
        let spec = source.spec();
        println!(
            "{:>5}  {:<28}  {:<14}  {} - {}",
            spec.level,
            spec.voxel_size.to_string(),
            spec.chunk_data_size.to_string(),
            spec.lower_voxel_bound,
            spec.upper_voxel_bound
        );
    }
    Ok(())
}
