//! Hand-picked colors that replace sampled ones.
//!
//! The table is a semicolon-separated file with a header row:
//!
//! ```text
//! texture;r;g;b;a;noise
//! block/water_still;40;93;255;36;0
//! ```

use super::ColorSample;
use crate::error::{ColorGenError, Result};
use crate::types::strip_namespace;
use std::collections::HashMap;
use std::path::Path;

/// Per-texture color overrides.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    rows: HashMap<String, ColorSample>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a table. The first line is a header and is skipped, as are
    /// blank lines. The first row for a texture wins.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut rows = HashMap::new();

        for (index, line) in contents.lines().enumerate().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (texture, sample) = parse_row(line, index + 1)?;
            rows.entry(texture).or_insert(sample);
        }

        Ok(Self { rows })
    }

    /// Get the override for a texture, if any.
    pub fn get(&self, texture: &str) -> Option<ColorSample> {
        self.rows.get(strip_namespace(texture)).copied()
    }

    pub fn insert(&mut self, texture: &str, sample: ColorSample) {
        self.rows.insert(strip_namespace(texture).to_string(), sample);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn parse_row(line: &str, line_number: usize) -> Result<(String, ColorSample)> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    if fields.len() < 6 {
        return Err(ColorGenError::InvalidOverride {
            line: line_number,
            reason: format!("expected 6 fields, found {}", fields.len()),
        });
    }

    let mut values = [0u8; 5];
    for (value, field) in values.iter_mut().zip(&fields[1..6]) {
        *value = field.parse().map_err(|_| ColorGenError::InvalidOverride {
            line: line_number,
            reason: format!("'{}' is not a value in 0-255", field),
        })?;
    }

    let [r, g, b, a, noise] = values;
    let texture = strip_namespace(fields[0]).to_string();
    Ok((texture, ColorSample::new(r, g, b, a, noise)))
}
