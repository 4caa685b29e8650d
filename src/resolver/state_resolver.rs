//! Block state to model variant resolution.

use crate::error::{ColorGenError, Result};
use crate::resource_pack::{blockstate::build_property_string, DocumentCache, VariantCondition};
use std::collections::BTreeMap;

/// The variants of one block, in blockstate declaration order.
#[derive(Debug, Clone)]
pub struct BlockVariants {
    pub block: String,
    /// (condition, model location) pairs.
    pub variants: Vec<(VariantCondition, String)>,
}

impl BlockVariants {
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Index of the variant used for a state.
    ///
    /// A lone variant covers every state. Otherwise the first variant whose
    /// condition matches wins.
    pub fn select(&self, properties: &BTreeMap<String, String>) -> Result<usize> {
        if self.variants.len() == 1 {
            return Ok(0);
        }

        self.variants
            .iter()
            .position(|(condition, _)| condition.matches(properties))
            .ok_or_else(|| ColorGenError::UnresolvedVariant {
                block: self.block.clone(),
                properties: build_property_string(properties),
            })
    }
}

/// Resolves block states to model variants.
pub struct StateResolver<'a> {
    documents: &'a DocumentCache<'a>,
}

impl<'a> StateResolver<'a> {
    pub fn new(documents: &'a DocumentCache<'a>) -> Self {
        Self { documents }
    }

    /// Load the variants of a block (e.g. "minecraft:furnace").
    pub fn resolve(&self, block_name: &str) -> Result<BlockVariants> {
        let blockstate = self.documents.blockstate(block_name)?;

        if blockstate.is_empty() {
            log::warn!("Blockstate of {} has no variants or multipart", block_name);
        }

        let variants = blockstate
            .representative_models()
            .into_iter()
            .map(|(key, model)| (VariantCondition::parse(&key), model.model_location()))
            .collect();

        Ok(BlockVariants {
            block: block_name.to_string(),
            variants,
        })
    }
}
