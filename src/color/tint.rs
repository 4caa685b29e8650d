//! Texture tinting for water, redstone dust and foliage.
//!
//! In Minecraft, certain block textures are stored in grayscale and tinted
//! at render time. Sampling them untinted would give gray map colors, so a
//! fixed color is multiplied in before statistics are taken.

use crate::resource_pack::TextureData;
use serde::{Deserialize, Serialize};

/// Tint colors for different texture categories (RGBA, 0-255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TintColors {
    /// Water textures (`block/water_*`).
    pub water: [u8; 4],
    /// Redstone dust textures (`block/redstone_dust_*`).
    pub redstone_dust: [u8; 4],
    /// Any other face with a tint index (grass, leaves, vines, ...).
    pub foliage: [u8; 4],
}

impl Default for TintColors {
    fn default() -> Self {
        Self {
            water: [40, 93, 255, 255],
            redstone_dust: [255, 51, 0, 255],
            foliage: [102, 255, 76, 255],
        }
    }
}

impl TintColors {
    /// Get the multiply color for a category, `None` for untinted textures.
    pub fn color_for(&self, category: TintCategory) -> Option<[u8; 4]> {
        match category {
            TintCategory::Water => Some(self.water),
            TintCategory::RedstoneDust => Some(self.redstone_dust),
            TintCategory::Foliage => Some(self.foliage),
            TintCategory::None => None,
        }
    }
}

/// Categories of texture tinting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TintCategory {
    /// Blue water tint, chosen by texture name
    Water,
    /// Red redstone tint, chosen by texture name
    RedstoneDust,
    /// Green tint for faces carrying a tint index
    Foliage,
    /// No tinting
    None,
}

impl TintCategory {
    /// Categorize a texture. Name categories take precedence over the
    /// face's tint flag.
    pub fn for_texture(texture: &str, tinted: bool) -> Self {
        if texture.contains("block/water_") {
            TintCategory::Water
        } else if texture.contains("block/redstone_dust_") {
            TintCategory::RedstoneDust
        } else if tinted {
            TintCategory::Foliage
        } else {
            TintCategory::None
        }
    }
}

/// Multiply two 8-bit channels, rounding to nearest.
pub fn multiply_channel(a: u8, b: u8) -> u8 {
    let tmp = a as u32 * b as u32 + 128;
    (((tmp >> 8) + tmp) >> 8) as u8
}

/// Multiply every pixel of a texture (all four channels) with a color.
pub fn apply_tint(texture: &TextureData, color: [u8; 4]) -> TextureData {
    let pixels = texture
        .pixels
        .chunks_exact(4)
        .flat_map(|px| {
            [
                multiply_channel(px[0], color[0]),
                multiply_channel(px[1], color[1]),
                multiply_channel(px[2], color[2]),
                multiply_channel(px[3], color[3]),
            ]
        })
        .collect();
    TextureData::new(texture.width, texture.height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_precedence() {
        assert_eq!(
            TintCategory::for_texture("block/water_still", false),
            TintCategory::Water
        );
        assert_eq!(
            TintCategory::for_texture("minecraft:block/water_flow", true),
            TintCategory::Water
        );
        assert_eq!(
            TintCategory::for_texture("block/redstone_dust_dot", true),
            TintCategory::RedstoneDust
        );
        assert_eq!(
            TintCategory::for_texture("block/grass_block_top", true),
            TintCategory::Foliage
        );
        assert_eq!(
            TintCategory::for_texture("block/stone", false),
            TintCategory::None
        );
    }

    #[test]
    fn test_multiply_channel() {
        assert_eq!(multiply_channel(255, 255), 255);
        assert_eq!(multiply_channel(255, 102), 102);
        assert_eq!(multiply_channel(0, 200), 0);
        assert_eq!(multiply_channel(128, 128), 64);
    }

    #[test]
    fn test_apply_tint() {
        let white = TextureData::solid(2, 2, [255, 255, 255, 255]);
        let tinted = apply_tint(&white, TintColors::default().foliage);
        assert_eq!(tinted.get_pixel(1, 1), [102, 255, 76, 255]);

        let clear = TextureData::solid(1, 1, [255, 255, 255, 0]);
        assert_eq!(apply_tint(&clear, [40, 93, 255, 255]).get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_untinted_category_has_no_color() {
        let colors = TintColors::default();
        assert_eq!(colors.color_for(TintCategory::None), None);
        assert_eq!(colors.color_for(TintCategory::Water), Some([40, 93, 255, 255]));
    }
}
