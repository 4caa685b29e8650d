//! Deduplication of color entries.
//!
//! Every block state starts out with its own entry, whose ID is the state's
//! game ID. Entries that look the same on the map are merged, the survivors
//! are numbered from 1, state trees are rewritten to the new IDs and trees
//! that no longer distinguish between states are collapsed.

mod tags;

pub use tags::{resolve_tags, to_ranges, IdRange, TagIds, TagMembership};

use crate::color::ColorSample;
use crate::geometry::DrawMode;
use crate::states::BlockStates;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Map color and draw mode of one or more block states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorModelEntry {
    /// Top color, then the side color if it differs.
    pub colors: Vec<ColorSample>,
    pub id: u32,
    #[serde(rename = "drawMode")]
    pub draw_mode: DrawMode,
    /// Full block and fully opaque.
    #[serde(rename = "solidBlock")]
    pub solid_block: bool,
}

impl ColorModelEntry {
    pub fn new(id: u32, colors: Vec<ColorSample>, draw_mode: DrawMode) -> Self {
        let solid_block = draw_mode.is_full_block() && colors.iter().all(ColorSample::is_opaque);
        Self {
            colors,
            id,
            draw_mode,
            solid_block,
        }
    }

    /// Draw modes are compared by their renderer code.
    fn merge_key(&self) -> (Vec<ColorSample>, u64) {
        (self.colors.clone(), self.draw_mode.code())
    }
}

/// The compacted color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compacted {
    pub models: Vec<ColorModelEntry>,
    pub blocks: BTreeMap<String, BlockStates>,
    pub tags: BTreeMap<String, TagIds>,
}

/// Merge duplicate entries, renumber them, rewrite and condense the state
/// trees and resolve tags.
///
/// Leaves that reference an ID without an entry are rewritten to 0, the ID
/// of air.
pub fn compact(
    entries: Vec<ColorModelEntry>,
    mut blocks: BTreeMap<String, BlockStates>,
    membership: &TagMembership,
    compress_ranges: bool,
) -> Compacted {
    let input_count = entries.len();

    // Old ID -> ID of the first entry with the same appearance.
    let mut survivor_of: HashMap<u32, u32> = HashMap::with_capacity(entries.len());
    let mut first_by_key: HashMap<(Vec<ColorSample>, u64), u32> = HashMap::new();
    let mut models = Vec::new();

    for entry in entries {
        match first_by_key.get(&entry.merge_key()) {
            Some(&survivor) => {
                survivor_of.insert(entry.id, survivor);
            }
            None => {
                first_by_key.insert(entry.merge_key(), entry.id);
                survivor_of.insert(entry.id, entry.id);
                models.push(entry);
            }
        }
    }

    // Survivor ID -> position in the output, starting at 1.
    let mut renumbered: HashMap<u32, u32> = HashMap::with_capacity(models.len());
    for (index, model) in models.iter_mut().enumerate() {
        let new_id = index as u32 + 1;
        renumbered.insert(model.id, new_id);
        model.id = new_id;
    }

    let remap: HashMap<u32, u32> = survivor_of
        .into_iter()
        .map(|(old, survivor)| (old, renumbered.get(&survivor).copied().unwrap_or(0)))
        .collect();

    let mut condensed = 0;
    for states in blocks.values_mut() {
        states.remap(|id| remap.get(&id).copied().unwrap_or(0));
        if states.condense() {
            condensed += 1;
        }
    }

    log::debug!(
        "Compacted {} entries into {}, condensed {} state trees",
        input_count,
        models.len(),
        condensed
    );

    let tags = resolve_tags(membership, &blocks, compress_ranges);
    Compacted {
        models,
        blocks,
        tags,
    }
}
