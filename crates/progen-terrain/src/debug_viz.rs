//! 2D previews of generated height fields.
//!
//! Provides [`DebugImage`] plus renderers that draw a field as grayscale
//! elevation or as flat biome colors, for diagnosing generation parameters
//! without building a mesh.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{color_to_rgb, height_to_gray, render_biome_debug, render_height_debug};
