//! Model inheritance resolution.
//!
//! Models are never merged. Only the information the color table needs is
//! extracted: the representative textures of the first model in the chain
//! that has elements, and the draw mode of the chain.

use crate::color::ColorSample;
use crate::error::{ColorGenError, Result};
use crate::geometry::{CubeModel, DrawMode};
use crate::resource_pack::DocumentCache;
use std::cell::RefCell;
use std::collections::HashMap;

/// Maximum depth for model inheritance to prevent infinite loops.
const MAX_INHERITANCE_DEPTH: usize = 10;

/// A representative texture of a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureRef {
    /// Texture location, or a `#variable` that no model in the chain defines.
    pub texture: String,
    pub tinted: bool,
}

impl TextureRef {
    pub fn new(texture: impl Into<String>, tinted: bool) -> Self {
        Self {
            texture: texture.into(),
            tinted,
        }
    }
}

/// Walks model parent chains.
pub struct ModelResolver<'a> {
    documents: &'a DocumentCache<'a>,
    cache: RefCell<HashMap<String, Vec<TextureRef>>>,
}

impl<'a> ModelResolver<'a> {
    pub fn new(documents: &'a DocumentCache<'a>) -> Self {
        Self {
            documents,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The top texture (then the side texture, if different) of a model.
    pub fn textures(&self, model_location: &str) -> Result<Vec<TextureRef>> {
        if let Some(cached) = self.cache.borrow().get(model_location) {
            return Ok(cached.clone());
        }

        let textures = self.textures_internal(model_location, 0)?;
        self.cache
            .borrow_mut()
            .insert(model_location.to_string(), textures.clone());

        Ok(textures)
    }

    fn textures_internal(&self, model_location: &str, depth: usize) -> Result<Vec<TextureRef>> {
        if depth >= MAX_INHERITANCE_DEPTH {
            return Err(ColorGenError::ModelInheritanceTooDeep(
                model_location.to_string(),
            ));
        }

        let model = self.documents.model(model_location)?;

        let mut textures = if model.has_elements() {
            let shape = CubeModel::from_elements(&model.elements);
            let (top, side) = shape.representative_faces();
            let found: Vec<TextureRef> = top
                .into_iter()
                .chain(side)
                .map(|face| TextureRef::new(face.texture, face.tinted))
                .collect();

            if found.is_empty() {
                return Err(ColorGenError::ModelResolution(format!(
                    "{} has no top or side face",
                    model_location
                )));
            }
            found
        } else if let Some(parent) = model.parent_location() {
            self.textures_internal(&parent, depth + 1)?
        } else {
            // Root model without geometry: fall back to its first texture.
            // No face in the chain can carry a tint index.
            let (_, texture) = model.textures.first().ok_or_else(|| {
                ColorGenError::ModelResolution(format!(
                    "{} has no elements, parent or textures",
                    model_location
                ))
            })?;
            return Ok(vec![TextureRef::new(texture.as_str(), false)]);
        };

        // One lookup per level; deeper placeholders resolve further down the stack.
        for texture in &mut textures {
            texture.texture = model.resolve_texture(&texture.texture).to_string();
        }
        if textures.len() == 2 && textures[0] == textures[1] {
            textures.truncate(1);
        }

        Ok(textures)
    }

    /// Draw mode of a model. Name rules are checked at every level of the
    /// chain, the first level with geometry (or the root) is classified.
    pub fn draw_mode(&self, model_location: &str, textures: &[ColorSample]) -> Result<DrawMode> {
        let mut current = model_location.to_string();

        for _ in 0..MAX_INHERITANCE_DEPTH {
            let model = self.documents.model(&current)?;
            let shape = model
                .has_elements()
                .then(|| CubeModel::from_elements(&model.elements));

            match (shape, model.parent_location()) {
                (None, Some(parent)) => {
                    if let Some(mode) = DrawMode::for_model_name(&current) {
                        return Ok(mode);
                    }
                    current = parent;
                }
                // A root without geometry (entity-rendered blocks) is a full block.
                (shape, _) => return Ok(DrawMode::classify(&current, shape.as_ref(), textures)),
            }
        }

        Err(ColorGenError::ModelInheritanceTooDeep(
            model_location.to_string(),
        ))
    }
}
