//! Block state and model resolution.
//!
//! Turns a block name into the models of its blockstate variants and, for
//! every variant, the textures that represent it on the map.

pub mod model_resolver;
pub mod state_resolver;

pub use model_resolver::{ModelResolver, TextureRef};
pub use state_resolver::{BlockVariants, StateResolver};

use crate::color::ColorSample;
use crate::error::Result;
use crate::geometry::DrawMode;
use crate::resource_pack::DocumentCache;
use std::collections::BTreeMap;

/// One blockstate variant with its representative textures.
#[derive(Debug, Clone)]
pub struct ResolvedVariant {
    /// Model resource location.
    pub model: String,
    /// Top texture, then the side texture if it differs.
    pub textures: Vec<TextureRef>,
}

/// Every variant of a block.
#[derive(Debug, Clone)]
pub struct ResolvedBlock {
    variants: BlockVariants,
    textures: Vec<Vec<TextureRef>>,
}

impl ResolvedBlock {
    pub fn block(&self) -> &str {
        &self.variants.block
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Variants in declaration order.
    pub fn variants(&self) -> impl Iterator<Item = ResolvedVariant> + '_ {
        self.variants
            .variants
            .iter()
            .zip(&self.textures)
            .map(|((_, model), textures)| ResolvedVariant {
                model: model.clone(),
                textures: textures.clone(),
            })
    }

    /// Index of the variant used for a state.
    pub fn select(&self, properties: &BTreeMap<String, String>) -> Result<usize> {
        self.variants.select(properties)
    }
}

/// Resolves blocks to variants and textures, caching models for the
/// resolver's lifetime.
pub struct TextureResolver<'a> {
    states: StateResolver<'a>,
    models: ModelResolver<'a>,
}

impl<'a> TextureResolver<'a> {
    pub fn new(documents: &'a DocumentCache<'a>) -> Self {
        Self {
            states: StateResolver::new(documents),
            models: ModelResolver::new(documents),
        }
    }

    /// Resolve the textures of every variant of a block.
    pub fn resolve_block(&self, block_name: &str) -> Result<ResolvedBlock> {
        let variants = self.states.resolve(block_name)?;

        let textures = variants
            .variants
            .iter()
            .map(|(_, model)| self.models.textures(model))
            .collect::<Result<Vec<_>>>()?;

        log::trace!("{}: {} variant(s)", block_name, variants.len());
        Ok(ResolvedBlock { variants, textures })
    }

    /// Draw mode of a model given the samples of its textures.
    pub fn draw_mode(&self, model: &str, samples: &[ColorSample]) -> Result<DrawMode> {
        self.models.draw_mode(model, samples)
    }
}
