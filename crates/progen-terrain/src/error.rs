//! Terrain generation error types.

/// Errors reported before any field is allocated or while assembling a biome table.
///
/// Degenerate numeric situations (zero-range fields, non-positive scale,
/// classification misses, malformed curves) are recovered locally and never
/// surface here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// A field was requested with a zero width or height.
    #[error("invalid field dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions {
        /// Requested column count.
        width: usize,
        /// Requested row count.
        height: usize,
    },

    /// Fractal sampling needs at least one octave.
    #[error("invalid octave count {0}: at least one octave is required")]
    InvalidOctaves(u32),

    /// Two fields that must be combined cell-by-cell have different shapes.
    #[error("field dimensions differ: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        /// `(width, height)` of the receiving field.
        expected: (usize, usize),
        /// `(width, height)` of the other field.
        found: (usize, usize),
    },

    /// A biome's lower bound lies above its upper bound, or a bound is not finite.
    #[error("biome '{name}' has an invalid range [{lower}, {upper}]")]
    InvalidBiomeRange {
        /// Biome name.
        name: String,
        /// Lower height bound.
        lower: f64,
        /// Upper height bound.
        upper: f64,
    },

    /// A biome with this name is already in the table.
    #[error("duplicate biome name: {0}")]
    DuplicateBiome(String),

    /// No height curve preset has this name.
    #[error("unknown height curve preset: {0}")]
    UnknownCurvePreset(String),
}
