//! Representative colors of block textures.
//!
//! A texture is reduced to a mean color, an alpha value, a noise figure
//! describing how much its pixels vary, and the share of fully transparent
//! pixels. Only the top-left square of the image is looked at, which is the
//! first frame of an animated texture.

pub mod overrides;
pub mod tint;

pub use overrides::OverrideTable;
pub use tint::{TintCategory, TintColors};

use crate::error::Result;
use crate::resource_pack::{DocumentCache, TextureData};
use crate::types::strip_namespace;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Aggregate color statistics of one texture.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    /// Pixel variance scaled to 0-255.
    #[serde(rename = "n")]
    pub noise: u8,
    /// Fraction of fully transparent pixels (0-1). Internal only.
    #[serde(skip)]
    pub empty_fraction: f32,
}

impl ColorSample {
    pub fn new(r: u8, g: u8, b: u8, a: u8, noise: u8) -> Self {
        Self {
            r,
            g,
            b,
            a,
            noise,
            empty_fraction: 0.0,
        }
    }

    /// True if the sample is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    fn key(&self) -> (u8, u8, u8, u8, u8, u32) {
        (
            self.r,
            self.g,
            self.b,
            self.a,
            self.noise,
            self.empty_fraction.to_bits(),
        )
    }
}

impl PartialEq for ColorSample {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ColorSample {}

impl Hash for ColorSample {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Compute the statistics of a texture that already has its tint applied.
///
/// With `glass` set, transparent pixels take part in the color mean as well.
/// The alpha mean always covers every pixel of the window.
pub fn sample(texture: &TextureData, glass: bool) -> ColorSample {
    let size = texture.square_size();
    let total = size as u64 * size as u64;
    if total == 0 {
        return ColorSample {
            empty_fraction: 1.0,
            ..Default::default()
        };
    }

    let mut counted = total;
    let mut empty = 0u64;
    let mut sums = [0u64; 4];

    for y in 0..size {
        for x in 0..size {
            let px = texture.get_pixel(x, y);
            if px[3] == 0 {
                empty += 1;
                if !glass {
                    counted -= 1;
                    continue;
                }
            }
            for (sum, channel) in sums.iter_mut().zip(px) {
                *sum += channel as u64;
            }
        }
    }

    let n = counted as f64;
    let (mean_r, mean_g, mean_b) = if counted == 0 {
        (0.0, 0.0, 0.0)
    } else {
        (sums[0] as f64 / n, sums[1] as f64 / n, sums[2] as f64 / n)
    };
    let mean_a = sums[3] as f64 / total as f64;

    // Red is compared against the red mean, green against the blue mean and
    // blue against the green mean. The renderer's noise scale was tuned on
    // this pairing.
    let mut variance = 0.0;
    if counted > 0 {
        for y in 0..size {
            for x in 0..size {
                let px = texture.get_pixel(x, y);
                let dr = px[0] as f64 - mean_r;
                let dg = px[1] as f64 - mean_b;
                let db = px[2] as f64 - mean_g;
                variance += (dr * dr + dg * dg + db * db) / (3.0 * n);
            }
        }
    }

    let noise = if counted > 1 {
        8.0 * variance / ((n * n - 1.0) / 12.0)
    } else {
        0.0
    };

    let mut a = (mean_a as u64).min(255) as u8;
    if counted < total {
        a = a.max(254);
    }

    ColorSample {
        r: mean_r as u8,
        g: mean_g as u8,
        b: mean_b as u8,
        a,
        noise: (noise as u64).min(255) as u8,
        empty_fraction: (empty as f64 / total as f64) as f32,
    }
}

/// Sample a texture after applying the tint of its category.
pub fn sample_tinted(
    texture_name: &str,
    texture: &TextureData,
    category: TintCategory,
    tints: &TintColors,
) -> ColorSample {
    let glass = texture_name.contains("glass");
    match tints.color_for(category) {
        Some(color) => sample(&tint::apply_tint(texture, color), glass),
        None => sample(texture, glass),
    }
}

/// Memoized samples keyed by texture and tint category.
#[derive(Debug, Default)]
pub struct ColorCache {
    samples: RefCell<HashMap<(String, TintCategory), ColorSample>>,
}

impl ColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, texture: &str, category: TintCategory) -> Option<ColorSample> {
        self.samples
            .borrow()
            .get(&(texture.to_string(), category))
            .copied()
    }

    pub fn insert(&self, texture: &str, category: TintCategory, sample: ColorSample) {
        self.samples
            .borrow_mut()
            .insert((texture.to_string(), category), sample);
    }

    pub fn len(&self) -> usize {
        self.samples.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Looks up, decodes, tints and samples textures, consulting the override
/// table first and caching every result for the sampler's lifetime.
pub struct ColorSampler<'a> {
    documents: &'a DocumentCache<'a>,
    overrides: &'a OverrideTable,
    tints: TintColors,
    cache: ColorCache,
}

impl<'a> ColorSampler<'a> {
    pub fn new(
        documents: &'a DocumentCache<'a>,
        overrides: &'a OverrideTable,
        tints: TintColors,
    ) -> Self {
        Self {
            documents,
            overrides,
            tints,
            cache: ColorCache::new(),
        }
    }

    /// Get the color of a texture (e.g. "minecraft:block/grass_block_top").
    pub fn sample(&self, texture: &str, tinted: bool) -> Result<ColorSample> {
        let texture = strip_namespace(texture);
        let category = TintCategory::for_texture(texture, tinted);

        if let Some(cached) = self.cache.get(texture, category) {
            return Ok(cached);
        }

        let color = match self.overrides.get(texture) {
            Some(color) => {
                log::debug!("Using override color for {}", texture);
                color
            }
            None => {
                let data = self.documents.texture(texture)?;
                sample_tinted(texture, &data, category, &self.tints)
            }
        };

        self.cache.insert(texture, category, color);
        Ok(color)
    }

    /// Number of distinct (texture, tint) samples computed so far.
    pub fn cached_samples(&self) -> usize {
        self.cache.len()
    }
}
