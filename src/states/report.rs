//! The game's block report (`reports/blocks.json` from the data generator).

use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// All blocks of a game version, keyed by namespaced name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct BlockReport {
    pub blocks: BTreeMap<String, BlockDefinition>,
}

/// One block of the report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockDefinition {
    /// Property name -> allowed values. Absent for blocks with one state.
    #[serde(default)]
    pub properties: Option<BTreeMap<String, Vec<String>>>,
    pub states: Vec<State>,
}

/// One concrete property assignment of a block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct State {
    pub id: u32,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// The game's default state flag. Not used for color generation.
    #[serde(default)]
    pub default: bool,
}

impl BlockDefinition {
    /// Smallest state ID of the block, which follows the game's registry order.
    pub fn lowest_state_id(&self) -> Option<u32> {
        self.states.iter().map(|state| state.id).min()
    }

    pub fn has_properties(&self) -> bool {
        self.properties.as_ref().map_or(false, |p| !p.is_empty())
    }
}

impl BlockReport {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn state_count(&self) -> usize {
        self.blocks.values().map(|block| block.states.len()).sum()
    }

    /// Blocks sorted by their lowest state ID, then name.
    pub fn in_registry_order(&self) -> Vec<(&str, &BlockDefinition)> {
        let mut blocks: Vec<_> = self
            .blocks
            .iter()
            .map(|(name, block)| (name.as_str(), block))
            .collect();
        blocks.sort_by_key(|(name, block)| (block.lowest_state_id().unwrap_or(u32::MAX), *name));
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
        "minecraft:grass_block": {
            "properties": { "snowy": ["true", "false"] },
            "states": [
                { "id": 8, "properties": { "snowy": "true" } },
                { "default": true, "id": 9, "properties": { "snowy": "false" } }
            ]
        },
        "minecraft:air": { "states": [{ "default": true, "id": 0 }] },
        "minecraft:stone": { "states": [{ "default": true, "id": 1 }] }
    }"#;

    #[test]
    fn test_parse_report() {
        let report: BlockReport = serde_json::from_str(REPORT).unwrap();
        assert_eq!(report.len(), 3);
        assert_eq!(report.state_count(), 4);

        let grass = &report.blocks["minecraft:grass_block"];
        assert!(grass.has_properties());
        assert_eq!(grass.states[1].properties["snowy"], "false");
        assert!(grass.states[1].default);
        assert!(!report.blocks["minecraft:stone"].has_properties());
    }

    #[test]
    fn test_registry_order() {
        let report: BlockReport = serde_json::from_str(REPORT).unwrap();
        let names: Vec<_> = report.in_registry_order().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["minecraft:air", "minecraft:stone", "minecraft:grass_block"]
        );
    }

    #[test]
    fn test_load_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocks.json");
        std::fs::write(&path, REPORT).unwrap();
        assert_eq!(BlockReport::load(&path).unwrap().len(), 3);

        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(BlockReport::load(&path).is_err());
    }
}
