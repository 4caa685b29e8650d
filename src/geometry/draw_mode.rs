//! Draw-mode classification.
//!
//! The renderer understands a fixed set of footprints, each identified by an
//! opaque integer. The codes must not change.

use super::CubeModel;
use crate::color::ColorSample;
use crate::types::strip_namespace;
use serde::{Serialize, Serializer};

/// How the renderer draws a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    Torch,
    Plant,
    Fence,
    Rail,
    Fire,
    FullBlock,
    FullBlockTwoColor,
    BottomSlab,
    BottomSlabTwoColor,
    TopSlab,
    TopSlabTwoColor,
    Wire,
    /// Snow layers, carpets, trapdoors, pressure plates.
    Flat,
}

impl DrawMode {
    /// The renderer's code for this mode. Rail and Flat share a code.
    pub fn code(&self) -> u64 {
        match self {
            DrawMode::Torch => 2148007936,
            DrawMode::Plant => 1101663371264,
            DrawMode::Fence => 2415984784,
            DrawMode::Rail => 4792320,
            DrawMode::Fire => 17628802408836,
            DrawMode::FullBlock => 162080096478354,
            DrawMode::FullBlockTwoColor => 202290807436434,
            DrawMode::BottomSlab => 19634135040,
            DrawMode::BottomSlabTwoColor => 29448806400,
            DrawMode::TopSlab => 4793490,
            DrawMode::TopSlabTwoColor => 7189650,
            DrawMode::Wire => 2415919104,
            DrawMode::Flat => 4792320,
        }
    }

    /// Only full blocks can be solid.
    pub fn is_full_block(&self) -> bool {
        matches!(self, DrawMode::FullBlock | DrawMode::FullBlockTwoColor)
    }

    pub fn full_block(texture_count: usize) -> Self {
        if texture_count > 1 {
            DrawMode::FullBlockTwoColor
        } else {
            DrawMode::FullBlock
        }
    }

    fn bottom_slab(texture_count: usize) -> Self {
        if texture_count > 1 {
            DrawMode::BottomSlabTwoColor
        } else {
            DrawMode::BottomSlab
        }
    }

    fn top_slab(texture_count: usize) -> Self {
        if texture_count > 1 {
            DrawMode::TopSlabTwoColor
        } else {
            DrawMode::TopSlab
        }
    }

    /// Modes fixed by model name alone (torches, plants, fences, rails, fire).
    pub fn for_model_name(model: &str) -> Option<Self> {
        let model = strip_namespace(model);

        if model == "block/template_torch" || model == "block/torch_wall" {
            return Some(DrawMode::Torch);
        }
        if model == "block/cross"
            || model == "block/tinted_cross"
            || model == "block/crop"
            || model.contains("seagrass")
            || model.starts_with("block/stem_")
            || model.starts_with("block/sunflower_")
        {
            return Some(DrawMode::Plant);
        }
        if model.starts_with("block/vine") || model.contains("fence") || model.contains("iron_bars") {
            return Some(DrawMode::Fence);
        }
        if model.contains("rail") {
            return Some(DrawMode::Rail);
        }
        if model.starts_with("block/fire") && !model.contains("coral") {
            return Some(DrawMode::Fire);
        }
        None
    }

    /// Classify a model's cubes. `textures` holds the top (then side)
    /// sample of the model.
    pub fn for_shape(shape: &CubeModel, textures: &[ColorSample]) -> Self {
        let count = textures.len();

        // Billboards count towards the height only when nothing else does.
        if shape.height(shape.volume() == 0.0) >= 0.75 {
            return DrawMode::full_block(count);
        }

        let height = shape.height(true);
        if height >= 0.4 {
            return if shape.lowest_point() <= 0.1 {
                DrawMode::bottom_slab(count)
            } else {
                DrawMode::top_slab(count)
            };
        }

        let mostly_empty = textures
            .first()
            .map_or(false, |primary| primary.empty_fraction > 0.8);
        if mostly_empty && height == 0.0 {
            return DrawMode::Wire;
        }
        if shape.top_surface() >= 0.76 {
            return DrawMode::Flat;
        }

        DrawMode::full_block(count)
    }

    /// Classify a single model level: name first, then geometry. A model
    /// without geometry is drawn as a full block.
    pub fn classify(model: &str, shape: Option<&CubeModel>, textures: &[ColorSample]) -> Self {
        if let Some(mode) = DrawMode::for_model_name(model) {
            return mode;
        }
        match shape {
            Some(shape) => DrawMode::for_shape(shape, textures),
            None => DrawMode::full_block(textures.len()),
        }
    }
}

impl Serialize for DrawMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Cube;
    use crate::types::Direction;
    use glam::Vec3;

    fn block(from: [f32; 3], to: [f32; 3]) -> Cube {
        Direction::ALL.iter().fold(
            Cube::new(Vec3::from_array(from), Vec3::from_array(to)),
            |c, dir| c.with_face(*dir, "#all", false),
        )
    }

    fn opaque() -> ColorSample {
        ColorSample::new(100, 100, 100, 255, 0)
    }

    #[test]
    fn test_codes() {
        assert_eq!(DrawMode::FullBlock.code(), 162080096478354);
        assert_eq!(DrawMode::Rail.code(), DrawMode::Flat.code());
        assert_eq!(serde_json::to_string(&DrawMode::Torch).unwrap(), "2148007936");
    }

    #[test]
    fn test_name_overrides() {
        assert_eq!(DrawMode::for_model_name("minecraft:block/template_torch"), Some(DrawMode::Torch));
        assert_eq!(DrawMode::for_model_name("block/tinted_cross"), Some(DrawMode::Plant));
        assert_eq!(DrawMode::for_model_name("block/tall_seagrass_top"), Some(DrawMode::Plant));
        assert_eq!(DrawMode::for_model_name("block/stem_growth3"), Some(DrawMode::Plant));
        assert_eq!(DrawMode::for_model_name("block/vine"), Some(DrawMode::Fence));
        assert_eq!(DrawMode::for_model_name("block/oak_fence_post"), Some(DrawMode::Fence));
        assert_eq!(DrawMode::for_model_name("block/iron_bars_side"), Some(DrawMode::Fence));
        assert_eq!(DrawMode::for_model_name("block/powered_rail_on"), Some(DrawMode::Rail));
        assert_eq!(DrawMode::for_model_name("block/fire_floor0"), Some(DrawMode::Fire));
        assert_eq!(DrawMode::for_model_name("block/fire_coral_fan"), None);
        assert_eq!(DrawMode::for_model_name("block/stone"), None);
    }

    #[test]
    fn test_full_height_cube_is_full_block() {
        let shape = CubeModel::new(vec![block([0.0; 3], [16.0; 3])]);
        assert_eq!(shape.height(false), 1.0);

        let mode = DrawMode::for_shape(&shape, &[opaque()]);
        assert_eq!(mode, DrawMode::FullBlock);
        assert!(mode.is_full_block());

        let mode = DrawMode::for_shape(&shape, &[opaque(), ColorSample::new(1, 2, 3, 255, 0)]);
        assert_eq!(mode, DrawMode::FullBlockTwoColor);
    }

    #[test]
    fn test_half_height_cube_is_bottom_slab() {
        let shape = CubeModel::new(vec![block([0.0; 3], [16.0, 8.0, 16.0])]);
        assert_eq!(shape.lowest_point(), 0.0);
        assert_eq!(DrawMode::for_shape(&shape, &[opaque()]), DrawMode::BottomSlab);
        assert!(!DrawMode::BottomSlab.is_full_block());
    }

    #[test]
    fn test_upper_half_is_top_slab() {
        let shape = CubeModel::new(vec![block([0.0, 8.0, 0.0], [16.0; 3])]);
        assert_eq!(
            DrawMode::for_shape(&shape, &[opaque(), opaque()]),
            DrawMode::TopSlabTwoColor
        );
    }

    #[test]
    fn test_flat_and_wire() {
        let carpet = CubeModel::new(vec![block([0.0; 3], [16.0, 1.0, 16.0])]);
        assert_eq!(DrawMode::for_shape(&carpet, &[opaque()]), DrawMode::Flat);

        let mut sparse = opaque();
        sparse.empty_fraction = 0.9;
        let dust = CubeModel::new(vec![block([0.0, 0.25, 0.0], [16.0, 0.25, 16.0])]);
        assert_eq!(DrawMode::for_shape(&dust, &[sparse]), DrawMode::Wire);

        // A small low shape that is neither falls back to a full block.
        let button = CubeModel::new(vec![block([5.0, 0.0, 6.0], [11.0, 2.0, 10.0])]);
        assert_eq!(DrawMode::for_shape(&button, &[opaque()]), DrawMode::FullBlock);
    }

    #[test]
    fn test_billboards_only_count_without_volume() {
        // A thin plate plus a full-height plane: the plane is skipped for the
        // full-block check but still makes the model tall enough for a slab.
        let shape = CubeModel::new(vec![
            block([0.0; 3], [16.0, 1.0, 16.0]),
            block([8.0, 0.0, 0.0], [8.0, 16.0, 16.0]),
        ]);
        assert_eq!(DrawMode::for_shape(&shape, &[opaque()]), DrawMode::BottomSlab);

        // Planes alone do count.
        let planes = CubeModel::new(vec![block([8.0, 0.0, 0.0], [8.0, 16.0, 16.0])]);
        assert_eq!(DrawMode::for_shape(&planes, &[opaque()]), DrawMode::FullBlock);
    }

    #[test]
    fn test_classify_checks_name_first() {
        let shape = CubeModel::new(vec![block([0.0; 3], [16.0; 3])]);
        assert_eq!(
            DrawMode::classify("block/oak_fence_inventory", Some(&shape), &[opaque()]),
            DrawMode::Fence
        );
        assert_eq!(DrawMode::classify("block/cube_all", None, &[opaque(), opaque()]), DrawMode::FullBlockTwoColor);
    }
}
