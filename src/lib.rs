//! # Block Colors
//!
//! A Rust library for generating block color lookup tables for Minecraft
//! map renderers.
//!
//! ## Overview
//!
//! This library takes the game's block report and its assets (client JAR,
//! resource pack or unpacked directory) as input and produces a compact
//! table: a state ID tree per block, a deduplicated list of colors and
//! draw modes, and named groups of IDs (tags).
//!
//! ## Quick Start
//!
//! ```ignore
//! use block_colors::{open_source, BlockReport, ColorTableGenerator, TagMembership};
//!
//! let source = open_source("versions/1.20.4/1.20.4.jar")?;
//! let report = BlockReport::load("generated/reports/blocks.json")?;
//!
//! let generator = ColorTableGenerator::new(&source);
//! let table = generator.generate(&report, &TagMembership::new().with_defaults())?;
//!
//! table.write("colors.json", false)?;
//! ```

pub mod color;
pub mod compact;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod resolver;
pub mod resource_pack;
pub mod states;
pub mod types;

// Re-export main types for convenience
pub use color::{ColorSample, ColorSampler, OverrideTable, TintCategory, TintColors};
pub use compact::{compact, ColorModelEntry, IdRange, TagIds, TagMembership};
pub use error::{ColorGenError, Result};
pub use generator::{ColorTable, ColorTableGenerator, GeneratorConfig};
pub use geometry::{Cube, CubeModel, DrawMode};
pub use resolver::TextureResolver;
pub use resource_pack::{
    count_assets, open_source, AssetCounts, AssetSource, DirSource, DocumentCache, MemorySource,
    ZipSource,
};
pub use states::{build_block_states, BlockReport, BlockStates, StateNode};
pub use types::Direction;

/// Generate a color table from files on disk with the given configuration.
pub fn generate_from_paths<P, Q>(
    assets: P,
    report: Q,
    tags: &TagMembership,
    config: GeneratorConfig,
) -> Result<ColorTable>
where
    P: AsRef<std::path::Path>,
    Q: AsRef<std::path::Path>,
{
    let source = open_source(assets)?;
    let report = BlockReport::load(report)?;
    ColorTableGenerator::with_config(&source, config).generate(&report, tags)
}
