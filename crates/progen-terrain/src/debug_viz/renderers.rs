//! Height and biome preview renderers.

use glam::Vec3;

use super::image::DebugImage;
use crate::biome::BiomeTable;
use crate::error::TerrainError;
use crate::field::{HeightField, ShapedField};

/// Map a height to an 8-bit gray level. Values outside `[0, 1]` saturate.
pub fn height_to_gray(height: f64) -> u8 {
    if height.is_nan() {
        return 0;
    }
    (height.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert an RGB color in `[0, 1]` to 8-bit channels.
pub fn color_to_rgb(color: Vec3) -> [u8; 3] {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8]
}

/// Render `field` as grayscale, one pixel per cell, row 0 at the top.
///
/// # Errors
///
/// Returns [`TerrainError::InvalidDimensions`] if the field is too large for an image.
pub fn render_height_debug(field: &HeightField) -> Result<DebugImage, TerrainError> {
    let mut image = DebugImage::new(field.width(), field.height())?;
    for (y, row) in field.rows().enumerate() {
        for (x, &h) in row.iter().enumerate() {
            let g = height_to_gray(h);
            image.set_rgb(x as u32, y as u32, [g, g, g]);
        }
    }
    Ok(image)
}

/// Render the biome classification of every cell of `field`.
///
/// Uses the same clamped unit value the mesh colors are derived from, so the
/// preview matches the generated vertex colors.
///
/// # Errors
///
/// Returns [`TerrainError::InvalidDimensions`] if the field is too large for an image.
pub fn render_biome_debug(
    field: &ShapedField,
    biomes: &BiomeTable,
) -> Result<DebugImage, TerrainError> {
    let (width, height) = field.field().dimensions();
    let mut image = DebugImage::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let color = biomes.classify(field.unit_value(x, y));
            image.set_rgb(x as u32, y as u32, color_to_rgb(color));
        }
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::RawField;

    #[test]
    fn test_height_to_gray_saturates() {
        assert_eq!(height_to_gray(0.0), 0);
        assert_eq!(height_to_gray(1.0), 255);
        assert_eq!(height_to_gray(-3.0), 0);
        assert_eq!(height_to_gray(2.0), 255);
        assert_eq!(height_to_gray(f64::NAN), 0);
        assert_eq!(height_to_gray(0.5), 128);
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Vec3::new(1.0, 0.0, 0.5)), [255, 0, 128]);
        assert_eq!(color_to_rgb(Vec3::new(2.0, -1.0, 0.0)), [255, 0, 0]);
    }

    #[test]
    fn test_height_render_gradient() {
        let field = HeightField::from_fn(5, 2, |x, _| x as f64 / 4.0).unwrap();
        let image = render_height_debug(&field).unwrap();
        assert_eq!(image.dimensions(), (5, 2));
        assert_eq!(image.pixel(0, 1), [0, 0, 0, 255]);
        assert_eq!(image.pixel(4, 0), [255, 255, 255, 255]);
        assert_eq!(image.unique_color_count(), 5);
    }

    #[test]
    fn test_biome_render_uses_table_colors() {
        let field = HeightField::from_fn(4, 1, |x, _| [0.1, 0.45, 0.75, 0.95][x]).unwrap();
        let shaped = RawField::new(field)
            .normalize()
            .shape(None)
            .unwrap();
        let table = BiomeTable::default();
        let image = render_biome_debug(&shaped, &table).unwrap();
        assert_eq!(image.unique_color_count(), 4);
        let water = table.get(0).unwrap().color();
        assert_eq!(&image.pixel(0, 0)[..3], &color_to_rgb(water));
    }
}
