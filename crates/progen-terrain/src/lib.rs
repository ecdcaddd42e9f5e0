//! Procedural heightfield generation: gradient noise, fractal sampling,
//! island falloff, height curves, and biome classification.

mod curve;
mod error;
mod falloff;
mod field;
mod fractal;
mod gradient;
mod settings;

pub mod biome;
pub mod debug_viz;

pub use biome::{Biome, BiomeTable, DEFAULT_FALLBACK_COLOR};
pub use curve::{CurvePreset, HeightCurve};
pub use error::TerrainError;
pub use falloff::FalloffMask;
pub use field::{CurvedField, HeightField, MAX_CELLS, NormalizedField, RawField, ShapedField};
pub use fractal::{FractalSampler, MIN_SCALE, NoiseConfig, OCTAVE_OFFSET_RANGE};
pub use gradient::{GradientNoise, PermutationTable};
pub use settings::TerrainSettings;
