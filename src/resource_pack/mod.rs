//! Resource pack access and parsing.
//!
//! This module abstracts where game assets come from (a client JAR, a
//! resource pack ZIP, an unpacked directory or memory) and parses the
//! blockstate, model and texture documents the generator needs.

pub mod loader;
pub mod blockstate;
pub mod model;
pub mod ordered;
pub mod texture;

pub use blockstate::{BlockstateDefinition, ModelVariant, MultipartCase, VariantCondition};
pub use loader::{open_source, DirSource, MemorySource, ZipSource};
pub use model::{BlockModel, ModelElement, ModelFace};
pub use ordered::OrderedMap;
pub use texture::TextureData;

use crate::error::{ColorGenError, Result};
use crate::types::parse_resource_location;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A read-only store of game assets addressed by archive-style paths such
/// as `assets/minecraft/blockstates/stone.json`.
pub trait AssetSource {
    /// Read the raw bytes of an asset, or `None` if it does not exist.
    fn read_asset(&self, path: &str) -> Result<Option<Vec<u8>>>;

    /// List every asset path in the source.
    fn list_assets(&self) -> Result<Vec<String>>;
}

impl<T: AssetSource + ?Sized> AssetSource for Box<T> {
    fn read_asset(&self, path: &str) -> Result<Option<Vec<u8>>> {
        (**self).read_asset(path)
    }

    fn list_assets(&self) -> Result<Vec<String>> {
        (**self).list_assets()
    }
}

/// Path of the blockstate document for a block, e.g. "minecraft:stone" ->
/// "assets/minecraft/blockstates/stone.json".
pub fn blockstate_path(block_name: &str) -> String {
    asset_path("blockstates", block_name, "json")
}

/// Path of a model document, e.g. "block/stone" -> "assets/minecraft/models/block/stone.json".
pub fn model_path(model: &str) -> String {
    asset_path("models", model, "json")
}

/// Path of a texture image, e.g. "block/stone" -> "assets/minecraft/textures/block/stone.png".
pub fn texture_path(texture: &str) -> String {
    asset_path("textures", texture, "png")
}

fn asset_path(kind: &str, location: &str, extension: &str) -> String {
    let (namespace, path) = parse_resource_location(location);
    format!("assets/{}/{}/{}.{}", namespace, kind, path, extension)
}

/// Parse an asset path from an archive.
/// Returns (namespace, asset_type, asset_path) if valid.
pub fn parse_asset_path(file_path: &str) -> Option<(&str, &str, &str)> {
    // Expected format: assets/{namespace}/{type}/{path}
    let parts: Vec<&str> = file_path.splitn(4, '/').collect();

    if parts.len() >= 4 && parts[0] == "assets" && !parts[3].is_empty() {
        Some((parts[1], parts[2], parts[3]))
    } else {
        None
    }
}

/// Number of documents of each kind in a source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetCounts {
    pub blockstates: usize,
    pub models: usize,
    pub textures: usize,
}

/// Count blockstates, models and textures in a source.
pub fn count_assets(source: &dyn AssetSource) -> Result<AssetCounts> {
    let mut counts = AssetCounts::default();
    for path in source.list_assets()? {
        match parse_asset_path(&path) {
            Some((_, "blockstates", p)) if p.ends_with(".json") => counts.blockstates += 1,
            Some((_, "models", p)) if p.ends_with(".json") => counts.models += 1,
            Some((_, "textures", p)) if p.ends_with(".png") => counts.textures += 1,
            _ => {}
        }
    }
    Ok(counts)
}

/// Parsed-document cache over an asset source.
///
/// Documents are parsed on first access and kept for the lifetime of the
/// cache. The source is assumed not to change while the cache is alive.
pub struct DocumentCache<'a> {
    source: &'a dyn AssetSource,
    blockstates: RefCell<HashMap<String, Rc<BlockstateDefinition>>>,
    models: RefCell<HashMap<String, Rc<BlockModel>>>,
}

impl<'a> DocumentCache<'a> {
    pub fn new(source: &'a dyn AssetSource) -> Self {
        Self {
            source,
            blockstates: RefCell::new(HashMap::new()),
            models: RefCell::new(HashMap::new()),
        }
    }

    /// Get the blockstate definition of a block (e.g., "minecraft:stone").
    pub fn blockstate(&self, block_name: &str) -> Result<Rc<BlockstateDefinition>> {
        let path = blockstate_path(block_name);
        if let Some(cached) = self.blockstates.borrow().get(&path) {
            return Ok(Rc::clone(cached));
        }

        let definition: Rc<BlockstateDefinition> = Rc::new(self.read_json(&path)?);
        self.blockstates
            .borrow_mut()
            .insert(path, Rc::clone(&definition));
        Ok(definition)
    }

    /// Get a model by resource location (e.g., "minecraft:block/stone").
    pub fn model(&self, model: &str) -> Result<Rc<BlockModel>> {
        let path = model_path(model);
        if let Some(cached) = self.models.borrow().get(&path) {
            return Ok(Rc::clone(cached));
        }

        let parsed: Rc<BlockModel> = Rc::new(self.read_json(&path)?);
        self.models.borrow_mut().insert(path, Rc::clone(&parsed));
        Ok(parsed)
    }

    /// Decode a texture by resource location (e.g., "block/stone"). Not
    /// cached; callers cache the statistics they derive from it instead.
    pub fn texture(&self, texture: &str) -> Result<TextureData> {
        let path = texture_path(texture);
        let bytes = self.read(&path)?;
        texture::load_texture_from_bytes(&bytes)
    }

    /// Number of parsed documents held by the cache.
    pub fn len(&self) -> usize {
        self.blockstates.borrow().len() + self.models.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.source
            .read_asset(path)?
            .ok_or_else(|| ColorGenError::MissingDocument(path.to_string()))
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let bytes = self.read(path)?;
        log::trace!("Parsing {}", path);
        Ok(serde_json::from_slice(&bytes)?)
    }
}
