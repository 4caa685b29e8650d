//! The color table pipeline.
//!
//! Builds the state trees, samples a color entry for every block state,
//! compacts the entries and resolves tags.

use crate::color::{ColorSampler, OverrideTable, TintColors};
use crate::compact::{compact, ColorModelEntry, TagIds, TagMembership};
use crate::error::Result;
use crate::resolver::TextureResolver;
use crate::resource_pack::{AssetSource, DocumentCache};
use crate::states::{self, BlockDefinition, BlockReport, BlockStates};
use crate::types::is_air;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration for a generator run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Draw grass blocks with grass on their sides.
    pub connected_grass: bool,
    /// Emit tags as `{min, max}` runs instead of ID lists.
    pub compress_tag_ranges: bool,
    /// Multiply colors for water, redstone and foliage textures.
    pub tint_colors: TintColors,
    /// Hand-picked colors replacing sampled ones.
    pub overrides: OverrideTable,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            connected_grass: false,
            compress_tag_ranges: false,
            tint_colors: TintColors::default(),
            overrides: OverrideTable::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_connected_grass(mut self, enabled: bool) -> Self {
        self.connected_grass = enabled;
        self
    }

    pub fn with_compressed_tags(mut self, enabled: bool) -> Self {
        self.compress_tag_ranges = enabled;
        self
    }

    pub fn with_tint_colors(mut self, colors: TintColors) -> Self {
        self.tint_colors = colors;
        self
    }

    pub fn with_overrides(mut self, overrides: OverrideTable) -> Self {
        self.overrides = overrides;
        self
    }
}

/// The generated lookup document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorTable {
    pub blocks: BTreeMap<String, BlockStates>,
    pub models: Vec<ColorModelEntry>,
    pub tags: BTreeMap<String, TagIds>,
}

impl ColorTable {
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        if pretty {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(serde_json::to_string(self)?)
        }
    }

    /// Write the table to a file.
    pub fn write<P: AsRef<Path>>(&self, path: P, pretty: bool) -> Result<()> {
        std::fs::write(path, self.to_json(pretty)?)?;
        Ok(())
    }

    /// Look up the entry of a block state.
    pub fn model_for(&self, block: &str, properties: &BTreeMap<String, String>) -> Option<&ColorModelEntry> {
        let id = self.blocks.get(block)?.lookup(properties)?;
        self.models.iter().find(|model| model.id == id)
    }
}

/// Runs the pipeline against one asset source.
pub struct ColorTableGenerator<'a> {
    source: &'a dyn AssetSource,
    config: GeneratorConfig,
}

impl<'a> ColorTableGenerator<'a> {
    /// Create a generator with default configuration.
    pub fn new(source: &'a dyn AssetSource) -> Self {
        Self::with_config(source, GeneratorConfig::default())
    }

    pub fn with_config(source: &'a dyn AssetSource, config: GeneratorConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the color table for a block report.
    ///
    /// Documents and samples are cached for the duration of the call only.
    pub fn generate(&self, report: &BlockReport, tags: &TagMembership) -> Result<ColorTable> {
        log::info!("Building state trees for {} blocks", report.len());
        let blocks = states::build_all(report)?;

        let documents = DocumentCache::new(self.source);
        let resolver = TextureResolver::new(&documents);
        let sampler = ColorSampler::new(&documents, &self.config.overrides, self.config.tint_colors);

        log::info!("Sampling colors for {} states", report.state_count());
        let mut entries = Vec::with_capacity(report.state_count());
        for (name, definition) in report.in_registry_order() {
            if is_air(name) {
                continue;
            }
            entries.extend(block_entries(name, definition, &resolver, &sampler)?);
        }
        log::debug!(
            "Parsed {} documents, sampled {} textures",
            documents.len(),
            sampler.cached_samples()
        );

        if self.config.connected_grass {
            connect_grass(&mut entries, &blocks);
        }

        log::info!("Compacting {} entries", entries.len());
        let compacted = compact(entries, blocks, tags, self.config.compress_tag_ranges);
        log::info!(
            "Generated {} models for {} blocks and {} tags",
            compacted.models.len(),
            compacted.blocks.len(),
            compacted.tags.len()
        );

        Ok(ColorTable {
            blocks: compacted.blocks,
            models: compacted.models,
            tags: compacted.tags,
        })
    }
}

/// One entry per state of a block, identified by the state's game ID.
fn block_entries(
    name: &str,
    definition: &BlockDefinition,
    resolver: &TextureResolver,
    sampler: &ColorSampler,
) -> Result<Vec<ColorModelEntry>> {
    let block = resolver.resolve_block(name)?;
    if block.is_empty() {
        log::warn!("Skipping {}: no models in blockstate", name);
        return Ok(Vec::new());
    }

    let mut appearances = Vec::with_capacity(block.len());
    for variant in block.variants() {
        let colors = variant
            .textures
            .iter()
            .map(|texture| sampler.sample(&texture.texture, texture.tinted))
            .collect::<Result<Vec<_>>>()?;
        let draw_mode = resolver.draw_mode(&variant.model, &colors)?;
        log::trace!("{} [{}] -> {:?}", name, variant.model, draw_mode);
        appearances.push((colors, draw_mode));
    }

    definition
        .states
        .iter()
        .map(|state| {
            let (colors, draw_mode) = &appearances[block.select(&state.properties)?];
            Ok(ColorModelEntry::new(state.id, colors.clone(), *draw_mode))
        })
        .collect()
}

/// Use the top color of the snowless grass block for its sides as well.
fn connect_grass(entries: &mut [ColorModelEntry], blocks: &BTreeMap<String, BlockStates>) {
    let snowless = BTreeMap::from([("snowy".to_string(), "false".to_string())]);
    let Some(id) = blocks
        .get("minecraft:grass_block")
        .and_then(|states| states.lookup(&snowless))
    else {
        log::warn!("No snowless grass block state; connected grass skipped");
        return;
    };

    if let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) {
        if entry.colors.len() == 2 {
            entry.colors[1] = entry.colors[0];
            log::debug!("Connected grass for state {}", id);
        }
    }
}
