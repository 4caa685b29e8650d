//! Tags: named groups of blocks, resolved to state IDs.

use crate::error::Result;
use crate::states::BlockStates;
use crate::types::DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Tag name -> member block names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TagMembership {
    pub tags: BTreeMap<String, Vec<String>>,
}

impl TagMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `{"tag": ["minecraft:block", ...]}` document.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Builder: add or replace a tag.
    pub fn with_tag<I, S>(mut self, name: &str, blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags
            .insert(name.to_string(), blocks.into_iter().map(Into::into).collect());
        self
    }

    /// Fill in the tags the renderer expects when the data pack does not
    /// define them.
    pub fn with_defaults(mut self) -> Self {
        let defaults: [(&str, &[&str]); 3] = [
            ("torches", &["minecraft:torch", "minecraft:wall_torch"]),
            ("snow", &["minecraft:snow", "minecraft:snow_block"]),
            ("grass_block", &["minecraft:grass_block"]),
        ];
        for (name, blocks) in defaults {
            self.tags
                .entry(name.to_string())
                .or_insert_with(|| blocks.iter().map(|b| b.to_string()).collect());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// An inclusive run of IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdRange {
    pub min: u32,
    pub max: u32,
}

/// The resolved IDs of a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagIds {
    List(Vec<u32>),
    Ranges(Vec<IdRange>),
}

impl TagIds {
    /// Check whether an ID belongs to the tag.
    pub fn contains(&self, id: u32) -> bool {
        match self {
            TagIds::List(ids) => ids.binary_search(&id).is_ok(),
            TagIds::Ranges(ranges) => ranges.iter().any(|r| r.min <= id && id <= r.max),
        }
    }
}

/// Collapse sorted, deduplicated IDs into runs of consecutive values.
pub fn to_ranges(ids: &[u32]) -> Vec<IdRange> {
    let mut ranges: Vec<IdRange> = Vec::new();
    for &id in ids {
        match ranges.last_mut() {
            Some(last) if last.max.checked_add(1) == Some(id) => last.max = id,
            _ => ranges.push(IdRange { min: id, max: id }),
        }
    }
    ranges
}

fn qualify(block: &str) -> String {
    if block.contains(':') {
        block.to_string()
    } else {
        format!("{}:{}", DEFAULT_NAMESPACE, block)
    }
}

/// Resolve every tag to the sorted IDs of its members' state trees. Block
/// names missing from `blocks` are skipped.
pub fn resolve_tags(
    membership: &TagMembership,
    blocks: &BTreeMap<String, BlockStates>,
    compress_ranges: bool,
) -> BTreeMap<String, TagIds> {
    membership
        .tags
        .iter()
        .map(|(name, members)| {
            let mut ids: Vec<u32> = members
                .iter()
                .filter_map(|block| blocks.get(&qualify(block)))
                .flat_map(BlockStates::leaf_ids)
                .collect();
            ids.sort_unstable();
            ids.dedup();

            let resolved = if compress_ranges {
                TagIds::Ranges(to_ranges(&ids))
            } else {
                TagIds::List(ids)
            };
            (name.clone(), resolved)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::StateNode;
    use serde_json::json;

    fn blocks() -> BTreeMap<String, BlockStates> {
        let mut blocks = BTreeMap::new();
        blocks.insert(
            "minecraft:water".to_string(),
            BlockStates {
                order: Some(vec!["level".to_string()]),
                states: StateNode::Branch(
                    [("0", 4), ("1", 5), ("2", 5), ("3", 6)]
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), StateNode::Leaf(v)))
                        .collect(),
                ),
            },
        );
        blocks.insert(
            "minecraft:bubble_column".to_string(),
            BlockStates {
                order: None,
                states: StateNode::single(9),
            },
        );
        blocks
    }

    #[test]
    fn test_resolve_list() {
        let membership = TagMembership::new()
            .with_tag("water", ["water", "minecraft:bubble_column", "minecraft:unknown"]);
        let tags = resolve_tags(&membership, &blocks(), false);
        assert_eq!(tags["water"], TagIds::List(vec![4, 5, 6, 9]));
        assert!(tags["water"].contains(9));
        assert!(!tags["water"].contains(7));
    }

    #[test]
    fn test_resolve_ranges() {
        let membership = TagMembership::new().with_tag("water", ["minecraft:water", "minecraft:bubble_column"]);
        let tags = resolve_tags(&membership, &blocks(), true);
        assert_eq!(
            serde_json::to_value(&tags).unwrap(),
            json!({ "water": [{ "min": 4, "max": 6 }, { "min": 9, "max": 9 }] })
        );
        assert!(tags["water"].contains(5));
    }

    #[test]
    fn test_empty_tag() {
        let membership = TagMembership::new().with_tag("lava", Vec::<String>::new());
        let tags = resolve_tags(&membership, &blocks(), false);
        assert_eq!(serde_json::to_value(&tags).unwrap(), json!({ "lava": [] }));
    }

    #[test]
    fn test_to_ranges() {
        assert!(to_ranges(&[]).is_empty());
        assert_eq!(
            to_ranges(&[1, 2, 3, 7, 9, 10]),
            vec![
                IdRange { min: 1, max: 3 },
                IdRange { min: 7, max: 7 },
                IdRange { min: 9, max: 10 },
            ]
        );
    }

    #[test]
    fn test_defaults_do_not_replace_loaded_tags() {
        let membership = TagMembership::new()
            .with_tag("snow", ["minecraft:powder_snow"])
            .with_defaults();
        assert_eq!(membership.len(), 3);
        assert_eq!(membership.tags["snow"], vec!["minecraft:powder_snow".to_string()]);
        assert_eq!(membership.tags["torches"].len(), 2);
    }

    #[test]
    fn test_load_membership() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.json");
        std::fs::write(&path, r#"{ "leaves": ["minecraft:oak_leaves"] }"#).unwrap();

        let membership = TagMembership::load(&path).unwrap();
        assert_eq!(membership.tags["leaves"], vec!["minecraft:oak_leaves".to_string()]);
    }
}
