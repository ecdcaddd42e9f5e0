//! Multi-octave fractal sampling over [`GradientNoise`].
//!
//! Every octave samples the noise at a seeded random offset so octaves are
//! decorrelated, with frequency scaled by `lacunarity` and amplitude by
//! `persistence` per step. The accumulated field is then normalized to `[0, 1]`.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TerrainError;
use crate::field::{HeightField, NormalizedField, RawField, check_dimensions};
use crate::gradient::GradientNoise;

/// Scale used in place of a non-positive `NoiseConfig::scale`.
pub const MIN_SCALE: f64 = 0.001;

/// Per-octave offsets are drawn uniformly from `[-OCTAVE_OFFSET_RANGE, OCTAVE_OFFSET_RANGE)`.
pub const OCTAVE_OFFSET_RANGE: f64 = 10_000.0;

/// Parameters for one fractal noise field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Columns in the generated field.
    pub width: usize,
    /// Rows in the generated field.
    pub height: usize,
    /// Seed for the octave offset generator.
    pub seed: u64,
    /// Cells per noise unit. Larger values zoom in. Non-positive values are
    /// replaced by [`MIN_SCALE`].
    pub scale: f64,
    /// Number of octaves to accumulate. Must be at least 1.
    pub octaves: u32,
    /// Amplitude multiplier between octaves, typically in `(0, 1)`.
    pub persistence: f64,
    /// Frequency multiplier between octaves, typically `>= 1`.
    pub lacunarity: f64,
    /// Shift added to every octave's sampling offset.
    pub offset: DVec2,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            seed: 21,
            scale: 0.3,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: DVec2::ZERO,
        }
    }
}

impl NoiseConfig {
    /// Reject configurations that cannot be sampled.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimensions`] for a zero dimension or a
    /// cell count above [`crate::field::MAX_CELLS`], and
    /// [`TerrainError::InvalidOctaves`] for zero octaves.
    pub fn validate(&self) -> Result<(), TerrainError> {
        check_dimensions(self.width, self.height)?;
        if self.octaves == 0 {
            return Err(TerrainError::InvalidOctaves(self.octaves));
        }
        Ok(())
    }

    /// The scale actually used for sampling.
    pub fn effective_scale(&self) -> f64 {
        if self.scale > 0.0 {
            self.scale
        } else {
            MIN_SCALE
        }
    }
}

/// Accumulates octaves of [`GradientNoise`] into a normalized height field.
#[derive(Clone, Debug, Default)]
pub struct FractalSampler {
    noise: GradientNoise,
}

impl FractalSampler {
    /// Create a sampler over the reference noise.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sampler over a specific noise evaluator.
    pub fn with_noise(noise: GradientNoise) -> Self {
        Self { noise }
    }

    /// The underlying noise evaluator.
    pub fn noise(&self) -> &GradientNoise {
        &self.noise
    }

    /// Per-octave sampling offsets for `config`.
    ///
    /// Draws from `ChaCha8Rng::seed_from_u64(seed)`, x before y for each octave,
    /// then adds `config.offset`.
    pub fn octave_offsets(config: &NoiseConfig) -> Vec<DVec2> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        (0..config.octaves)
            .map(|_| {
                let x = rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE);
                let y = rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE);
                DVec2::new(x, y) + config.offset
            })
            .collect()
    }

    /// Accumulate octaves without normalizing.
    ///
    /// # Errors
    ///
    /// Returns the [`NoiseConfig::validate`] error before allocating anything.
    pub fn sample_raw(&self, config: &NoiseConfig) -> Result<RawField, TerrainError> {
        config.validate()?;

        let scale = config.effective_scale();
        if scale != config.scale {
            debug!(requested = config.scale, used = scale, "clamped noise scale");
        }

        let offsets = Self::octave_offsets(config);
        let half_w = (config.width / 2) as f64;
        let half_h = (config.height / 2) as f64;

        let field = HeightField::from_fn(config.width, config.height, |x, y| {
            let mut amplitude = 1.0;
            let mut frequency = 1.0;
            let mut total = 0.0;
            for offset in &offsets {
                let sx = (x as f64 - half_w) / scale * frequency + offset.x;
                let sy = (y as f64 - half_h) / scale * frequency + offset.y;
                total += self.noise.noise(sx, sy, 0.0) * amplitude;
                amplitude *= config.persistence;
                frequency *= config.lacunarity;
            }
            total
        })?;

        let raw = RawField::new(field);
        let (min, max) = raw.range();
        debug!(
            width = config.width,
            height = config.height,
            octaves = config.octaves,
            min,
            max,
            "sampled fractal noise"
        );
        Ok(raw)
    }

    /// Generate a `height x width` field normalized to `[0, 1]`.
    ///
    /// Identical configurations always produce bit-identical fields.
    ///
    /// # Errors
    ///
    /// Returns the [`NoiseConfig::validate`] error before allocating anything.
    pub fn generate(&self, config: &NoiseConfig) -> Result<NormalizedField, TerrainError> {
        Ok(self.sample_raw(config)?.normalize())
    }
}
