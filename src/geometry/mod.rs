//! Shape metrics of cuboid block models.
//!
//! Coordinates are in model space (0-16 per axis). Areas are reported as a
//! fraction of a full block face and heights as a fraction of a block.

mod draw_mode;

pub use draw_mode::DrawMode;

use crate::resource_pack::ModelElement;
use crate::types::Direction;
use glam::Vec3;
use std::collections::HashMap;

/// Side length of a block in model space.
pub const BLOCK_SIZE: f32 = 16.0;

/// A texture binding of one cube face, together with the face's area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceValue<'a> {
    /// Face area as a fraction of a full block face.
    pub area: f32,
    /// Texture reference, possibly a `#variable`.
    pub texture: &'a str,
    pub tinted: bool,
}

/// One axis-aligned box of a model.
#[derive(Debug, Clone)]
pub struct Cube {
    pub start: Vec3,
    pub end: Vec3,
    /// Face -> (texture reference, tinted).
    pub faces: HashMap<Direction, (String, bool)>,
}

impl Cube {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            end,
            faces: HashMap::new(),
        }
    }

    /// Builder: bind a texture to a face.
    pub fn with_face(mut self, direction: Direction, texture: impl Into<String>, tinted: bool) -> Self {
        self.faces.insert(direction, (texture.into(), tinted));
        self
    }

    /// Build a cube from a model element.
    pub fn from_element(element: &ModelElement) -> Self {
        let faces = element
            .faces
            .iter()
            .map(|(direction, face)| (*direction, (face.texture.clone(), face.has_tint())))
            .collect();

        Self {
            start: Vec3::from_array(element.from),
            end: Vec3::from_array(element.to),
            faces,
        }
    }

    /// Volume as a fraction of a full block.
    pub fn volume(&self) -> f32 {
        let size = (self.end - self.start).abs();
        size.x * size.y * size.z / (BLOCK_SIZE * BLOCK_SIZE * BLOCK_SIZE)
    }

    /// The `up` face, if the cube has one.
    pub fn top_face(&self) -> Option<FaceValue<'_>> {
        let size = self.end - self.start;
        self.face_value(Direction::Up, size.x * size.z)
    }

    /// The largest lateral face. North is preferred over south and west
    /// over east; a west/east face only wins if it is strictly larger.
    pub fn side_face(&self) -> Option<FaceValue<'_>> {
        let size = self.end - self.start;

        let front = [Direction::North, Direction::South]
            .into_iter()
            .find_map(|dir| self.face_value(dir, size.x * size.y));
        let flank = [Direction::West, Direction::East]
            .into_iter()
            .find_map(|dir| self.face_value(dir, size.z * size.y));

        let best = match (front, flank) {
            (Some(f), Some(s)) if s.area > f.area => Some(s),
            (Some(f), _) => Some(f),
            (None, s) => s,
        };
        best.filter(|face| face.area > 0.0)
    }

    fn face_value(&self, direction: Direction, area: f32) -> Option<FaceValue<'_>> {
        self.faces.get(&direction).map(|(texture, tinted)| FaceValue {
            area: area / (BLOCK_SIZE * BLOCK_SIZE),
            texture,
            tinted: *tinted,
        })
    }
}

/// The cubes of a model, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct CubeModel {
    pub cubes: Vec<Cube>,
}

impl CubeModel {
    pub fn new(cubes: Vec<Cube>) -> Self {
        Self { cubes }
    }

    pub fn from_elements(elements: &[ModelElement]) -> Self {
        Self::new(elements.iter().map(Cube::from_element).collect())
    }

    /// Vertical extent of the model. Zero-volume cubes (billboards) only
    /// count when `include_flat` is set.
    pub fn height(&self, include_flat: bool) -> f32 {
        let mut min_y = BLOCK_SIZE;
        let mut max_y = 0.0f32;

        for cube in &self.cubes {
            if !include_flat && cube.volume() == 0.0 {
                continue;
            }
            min_y = min_y.min(cube.start.y);
            max_y = max_y.max(cube.end.y);
        }

        (max_y - min_y).max(0.0) / BLOCK_SIZE
    }

    /// Area of the largest `up` face.
    pub fn top_surface(&self) -> f32 {
        let largest = self
            .cubes
            .iter()
            .filter(|cube| cube.faces.contains_key(&Direction::Up))
            .map(|cube| ((cube.end.x - cube.start.x) * (cube.end.z - cube.start.z)).abs())
            .fold(0.0f32, f32::max);
        largest / (BLOCK_SIZE * BLOCK_SIZE)
    }

    pub fn volume(&self) -> f32 {
        self.cubes.iter().map(Cube::volume).sum()
    }

    pub fn lowest_point(&self) -> f32 {
        let min_y = self
            .cubes
            .iter()
            .map(|cube| cube.start.y)
            .fold(BLOCK_SIZE, f32::min);
        min_y / BLOCK_SIZE
    }

    /// First cube with the largest top face and first cube with the largest
    /// side face, chosen independently.
    pub fn representative_faces(&self) -> (Option<FaceValue<'_>>, Option<FaceValue<'_>>) {
        let mut top: Option<FaceValue> = None;
        let mut side: Option<FaceValue> = None;

        for cube in &self.cubes {
            if let Some(face) = cube.top_face().filter(|f| f.area > 0.0) {
                if top.map_or(true, |best| face.area > best.area) {
                    top = Some(face);
                }
            }
            if let Some(face) = cube.side_face() {
                if side.map_or(true, |best| face.area > best.area) {
                    side = Some(face);
                }
            }
        }

        (top, side)
    }
}
