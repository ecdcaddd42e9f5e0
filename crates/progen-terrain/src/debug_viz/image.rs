//! A 2D debug image represented as a flat array of RGBA pixels.

use hashbrown::HashSet;

use crate::error::TerrainError;

/// Row-major RGBA8 pixels sized to match a height field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DebugImage {
    /// Create an opaque black image.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimensions`] if a dimension is zero or
    /// does not fit in `u32`.
    pub fn new(width: usize, height: usize) -> Result<Self, TerrainError> {
        let invalid = || TerrainError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let w = u32::try_from(width).map_err(|_| invalid())?;
        let h = u32::try_from(height).map_err(|_| invalid())?;
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(invalid)?;
        let mut pixels = vec![0; len];
        for alpha in pixels.iter_mut().skip(3).step_by(4) {
            *alpha = u8::MAX;
        }
        Ok(Self {
            width: w,
            height: h,
            pixels,
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Set an opaque RGB pixel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_rgb(&mut self, x: u32, y: u32, [r, g, b]: [u8; 3]) {
        let idx = self.index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&[r, g, b, u8::MAX]);
    }

    /// RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.index(x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image, returning its RGBA bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Number of distinct RGB colors, ignoring alpha.
    pub fn unique_color_count(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .map(|px| (px[0], px[1], px[2]))
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_is_opaque_black() {
        let image = DebugImage::new(16, 8).unwrap();
        assert_eq!(image.dimensions(), (16, 8));
        assert_eq!(image.pixels().len(), 16 * 8 * 4);
        assert_eq!(image.pixel(15, 7), [0, 0, 0, 255]);
    }

    #[test]
    fn test_set_rgb_layout() {
        let mut image = DebugImage::new(10, 10).unwrap();
        image.set_rgb(3, 5, [255, 128, 64]);
        let idx = (5 * 10 + 3) * 4;
        assert_eq!(&image.pixels()[idx..idx + 4], &[255, 128, 64, 255]);
        assert_eq!(image.pixel(3, 5), [255, 128, 64, 255]);
    }

    #[test]
    fn test_unique_color_count() {
        let mut image = DebugImage::new(4, 1).unwrap();
        image.set_rgb(0, 0, [255, 0, 0]);
        image.set_rgb(1, 0, [0, 255, 0]);
        image.set_rgb(2, 0, [255, 0, 0]);
        image.set_rgb(3, 0, [0, 0, 255]);
        assert_eq!(image.unique_color_count(), 3);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(DebugImage::new(0, 4).is_err());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_panics() {
        let image = DebugImage::new(2, 2).unwrap();
        image.pixel(2, 0);
    }
}
