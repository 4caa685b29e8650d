//! Block model parsing.
//!
//! Block models define the 3D geometry of blocks using cuboid elements.

use super::ordered::OrderedMap;
use crate::types::{Direction, DEFAULT_NAMESPACE};
use serde::Deserialize;
use std::collections::HashMap;

/// A parsed block model from models/*.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockModel {
    /// Parent model to inherit from.
    #[serde(default)]
    pub parent: Option<String>,

    /// Texture variable definitions, in declaration order.
    #[serde(default)]
    pub textures: OrderedMap<String>,

    /// Model elements (cuboids).
    #[serde(default)]
    pub elements: Vec<ModelElement>,
}

impl BlockModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the full parent resource location.
    ///
    /// `builtin/*` parents are engine-provided and have no document, so they
    /// end the chain.
    pub fn parent_location(&self) -> Option<String> {
        self.parent
            .as_ref()
            .filter(|p| !p.starts_with("builtin/") && !p.starts_with("minecraft:builtin/"))
            .map(|p| {
                if p.contains(':') {
                    p.clone()
                } else {
                    format!("{}:{}", DEFAULT_NAMESPACE, p)
                }
            })
    }

    /// Check if this model has its own elements (not inherited).
    pub fn has_elements(&self) -> bool {
        !self.elements.is_empty()
    }

    /// Resolve a texture reference (e.g., "#side") one level against this
    /// model's texture variables. Literal paths and unknown variables are
    /// returned unchanged.
    pub fn resolve_texture<'a>(&'a self, reference: &'a str) -> &'a str {
        match reference.strip_prefix('#') {
            Some(key) => self.textures.get(key).map(|s| s.as_str()).unwrap_or(reference),
            None => reference,
        }
    }
}

/// A cuboid element within a model.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelElement {
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    /// Face definitions.
    #[serde(default)]
    pub faces: HashMap<Direction, ModelFace>,
}

/// A face of a model element.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelFace {
    /// Texture reference (e.g., "#side" or "block/stone").
    pub texture: String,
    /// Tint index for biome coloring (-1 = no tint).
    #[serde(default = "default_tint_index")]
    pub tintindex: i32,
}

fn default_tint_index() -> i32 {
    -1
}

impl ModelFace {
    /// Check if this face has a tint.
    pub fn has_tint(&self) -> bool {
        self.tintindex >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_model() {
        let json = r#"{
            "parent": "block/cube_all",
            "textures": {
                "all": "block/stone"
            }
        }"#;

        let model: BlockModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.parent, Some("block/cube_all".to_string()));
        assert_eq!(model.textures.get("all"), Some(&"block/stone".to_string()));
        assert!(!model.has_elements());
        assert_eq!(
            model.parent_location(),
            Some("minecraft:block/cube_all".to_string())
        );
    }

    #[test]
    fn test_parse_model_with_elements() {
        let json = r##"{
            "textures": {
                "texture": "block/stone"
            },
            "elements": [
                {
                    "from": [0, 0, 0],
                    "to": [16, 16, 16],
                    "faces": {
                        "down":  { "texture": "#texture", "cullface": "down" },
                        "up":    { "texture": "#texture", "cullface": "up", "tintindex": 0 },
                        "north": { "texture": "#texture", "cullface": "north" },
                        "south": { "texture": "#texture", "cullface": "south" },
                        "west":  { "texture": "#texture", "cullface": "west" },
                        "east":  { "texture": "#texture", "cullface": "east" }
                    }
                }
            ]
        }"##;

        let model: BlockModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.elements.len(), 1);

        let element = &model.elements[0];
        assert_eq!(element.from, [0.0, 0.0, 0.0]);
        assert_eq!(element.to, [16.0, 16.0, 16.0]);
        assert_eq!(element.faces.len(), 6);
        assert!(element.faces[&Direction::Up].has_tint());
        assert!(!element.faces[&Direction::Down].has_tint());
    }

    #[test]
    fn test_builtin_parent_ends_chain() {
        let model: BlockModel =
            serde_json::from_str(r#"{ "parent": "builtin/entity" }"#).unwrap();
        assert_eq!(model.parent_location(), None);
    }

    #[test]
    fn test_textures_keep_order() {
        let model: BlockModel = serde_json::from_str(
            r#"{ "textures": { "particle": "block/a", "all": "block/b" } }"#,
        )
        .unwrap();
        assert_eq!(model.textures.first(), Some(("particle", &"block/a".to_string())));
    }

    #[test]
    fn test_resolve_texture() {
        let model = BlockModel {
            textures: [
                ("all".to_string(), "block/stone".to_string()),
                ("side".to_string(), "#all".to_string()),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };

        assert_eq!(model.resolve_texture("#all"), "block/stone");
        assert_eq!(model.resolve_texture("#side"), "#all"); // Only one level
        assert_eq!(model.resolve_texture("block/dirt"), "block/dirt");
        assert_eq!(model.resolve_texture("#missing"), "#missing");
    }
}
