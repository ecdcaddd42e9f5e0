//! PNG previews of a generated terrain.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use progen_mesh::GeneratedTerrain;
use progen_terrain::BiomeTable;
use progen_terrain::debug_viz::{DebugImage, render_biome_debug, render_height_debug};

use crate::RunError;

/// Write `heightmap.png` (shaped heights, grayscale) and `biomes.png` into `dir`.
///
/// Returns the written paths.
pub fn write_previews(
    dir: &Path,
    terrain: &GeneratedTerrain,
    biomes: &BiomeTable,
) -> Result<Vec<PathBuf>, RunError> {
    std::fs::create_dir_all(dir).map_err(RunError::PreviewDir)?;

    let images = [
        ("heightmap.png", render_height_debug(terrain.shaped.field())?),
        ("biomes.png", render_biome_debug(&terrain.shaped, biomes)?),
    ];

    let mut written = Vec::with_capacity(images.len());
    for (name, image) in images {
        let path = dir.join(name);
        save_png(&path, image)?;
        written.push(path);
    }
    Ok(written)
}

fn save_png(path: &Path, image: DebugImage) -> Result<(), RunError> {
    let (width, height) = image.dimensions();
    let preview_error = |source: image::ImageError| RunError::Preview {
        path: path.to_path_buf(),
        source,
    };
    let buffer = RgbaImage::from_raw(width, height, image.into_pixels()).ok_or_else(|| {
        preview_error(image::ImageError::Parameter(
            image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            ),
        ))
    })?;
    buffer.save(path).map_err(preview_error)
}
