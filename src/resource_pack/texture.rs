//! Texture loading and handling.

use crate::error::Result;

/// Raw texture data decoded from PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// RGBA8 pixel data (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Create a new texture from RGBA data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a texture filled with one color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        Self::new(width, height, pixels)
    }

    /// Get a pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Set a pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Side length of the top-left square; animated textures are vertical
    /// strips of square frames, so this is the first frame.
    pub fn square_size(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Encode as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        use image::ImageEncoder;

        let mut bytes = Vec::new();
        let cursor = std::io::Cursor::new(&mut bytes);
        let encoder = image::codecs::png::PngEncoder::new(cursor);
        encoder.write_image(
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(bytes)
    }
}

/// Load a texture from PNG bytes, converting any color type to RGBA8.
pub fn load_texture_from_bytes(data: &[u8]) -> Result<TextureData> {
    let img = image::load_from_memory(data)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TextureData {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorGenError;

    #[test]
    fn test_get_pixel() {
        let tex = TextureData::new(
            2,
            2,
            vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 255, 255],
        );

        assert_eq!(tex.get_pixel(0, 0), [255, 0, 0, 255]); // Red
        assert_eq!(tex.get_pixel(1, 0), [0, 255, 0, 255]); // Green
        assert_eq!(tex.get_pixel(0, 1), [0, 0, 255, 255]); // Blue
        assert_eq!(tex.get_pixel(1, 1), [255, 255, 255, 255]); // White
    }

    #[test]
    fn test_solid_and_set_pixel() {
        let mut tex = TextureData::solid(4, 8, [1, 2, 3, 4]);
        assert_eq!(tex.pixels.len(), 4 * 8 * 4);
        assert_eq!(tex.square_size(), 4);
        tex.set_pixel(3, 7, [9, 9, 9, 9]);
        assert_eq!(tex.get_pixel(3, 7), [9, 9, 9, 9]);
        assert_eq!(tex.get_pixel(0, 0), [1, 2, 3, 4]);
    }

    #[test]
    fn test_png_roundtrip() {
        let tex = TextureData::solid(3, 3, [10, 20, 30, 40]);
        let png = tex.to_png().unwrap();
        assert_eq!(load_texture_from_bytes(&png).unwrap(), tex);
    }

    #[test]
    fn test_decode_failure() {
        let err = load_texture_from_bytes(b"not a png").unwrap_err();
        assert!(matches!(err, ColorGenError::DecodeFailure(_)));
    }
}
