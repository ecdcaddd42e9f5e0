//! Row-major height grids and the named pipeline stages built on them.
//!
//! Each stage is an immutable value produced from the previous one:
//! [`RawField`] → [`NormalizedField`] → [`ShapedField`] → [`CurvedField`].

use tracing::{debug, warn};

use crate::curve::HeightCurve;
use crate::error::TerrainError;

/// A `width x height` grid of samples stored row-major (`y * width + x`).
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl HeightField {
    /// Create a zero-filled field.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, TerrainError> {
        Self::from_fn(width, height, |_, _| 0.0)
    }

    /// Create a field by evaluating `f(x, y)` for each cell in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimensions`] if either dimension is zero
    /// or the cell count exceeds [`MAX_CELLS`].
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self, TerrainError> {
        check_dimensions(width, height)?;
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimensions`] if either dimension is zero
    /// or the cell count exceeds [`MAX_CELLS`], and
    /// [`TerrainError::DimensionMismatch`] if `values.len() != width * height`.
    pub fn from_values(width: usize, height: usize, values: Vec<f64>) -> Result<Self, TerrainError> {
        check_dimensions(width, height)?;
        if values.len() != width * height {
            return Err(TerrainError::DimensionMismatch {
                expected: (width, height),
                found: (values.len(), 1),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Sample at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.values[y * self.width + x]
    }

    /// Sample at column `x`, row `y`, or `None` when out of bounds.
    pub fn try_get(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.width && y < self.height).then(|| self.values[y * self.width + x])
    }

    /// All samples in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.width)
    }

    /// Smallest and largest sample. NaN samples are ignored.
    pub fn min_max(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Apply `f` to every sample, producing a new field of the same shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            width: self.width,
            height: self.height,
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two equally sized fields cell by cell.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::DimensionMismatch`] if the shapes differ.
    pub fn zip_map(
        &self,
        other: &HeightField,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Self, TerrainError> {
        if self.dimensions() != other.dimensions() {
            return Err(TerrainError::DimensionMismatch {
                expected: self.dimensions(),
                found: other.dimensions(),
            });
        }
        Ok(Self {
            width: self.width,
            height: self.height,
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

/// Largest cell count a field may hold, matching the `u32` vertex index range.
pub const MAX_CELLS: usize = u32::MAX as usize;

pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<(), TerrainError> {
    match width.checked_mul(height) {
        Some(cells) if cells > 0 && cells <= MAX_CELLS => Ok(()),
        _ => Err(TerrainError::InvalidDimensions { width, height }),
    }
}

/// Accumulated octave noise with an unbounded range.
#[derive(Clone, Debug, PartialEq)]
pub struct RawField {
    field: HeightField,
    min: f64,
    max: f64,
}

impl RawField {
    /// Wrap a field, recording its observed range.
    pub fn new(field: HeightField) -> Self {
        let (min, max) = field.min_max();
        Self { field, min, max }
    }

    /// The underlying samples.
    pub fn field(&self) -> &HeightField {
        &self.field
    }

    /// Observed `(min, max)`.
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Affinely remap `[min, max]` onto `[0, 1]`.
    ///
    /// A field with zero range normalizes to all zeros.
    pub fn normalize(&self) -> NormalizedField {
        let (min, max) = (self.min, self.max);
        let span = max - min;
        if !span.is_finite() || span <= 0.0 {
            warn!(min, max, "degenerate height field range, normalizing to zero");
            return NormalizedField(self.field.map(|_| 0.0));
        }
        debug!(min, max, "normalizing height field");
        NormalizedField(self.field.map(|v| (v - min) / span))
    }
}

/// Height samples in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedField(HeightField);

impl NormalizedField {
    /// The underlying samples.
    pub fn field(&self) -> &HeightField {
        &self.0
    }

    /// Consume the stage, returning its samples.
    pub fn into_inner(self) -> HeightField {
        self.0
    }

    /// Subtract an optional falloff mask.
    ///
    /// Without a mask the samples pass through unchanged. With one, values
    /// toward the edges drop below zero.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::DimensionMismatch`] if the mask has a different shape.
    pub fn shape(&self, falloff: Option<&HeightField>) -> Result<ShapedField, TerrainError> {
        match falloff {
            Some(mask) => Ok(ShapedField(self.0.zip_map(mask, |h, m| h - m)?)),
            None => Ok(ShapedField(self.0.clone())),
        }
    }
}

/// Normalized heights after optional falloff subtraction. Values may fall
/// below zero near the edges of an island.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedField(HeightField);

impl ShapedField {
    /// The underlying samples.
    pub fn field(&self) -> &HeightField {
        &self.0
    }

    /// Consume the stage, returning its samples.
    pub fn into_inner(self) -> HeightField {
        self.0
    }

    /// Sample clamped to `[0, 1]`, the domain biome bands and curves are defined over.
    pub fn unit_value(&self, x: usize, y: usize) -> f64 {
        clamp_unit(self.0.get(x, y))
    }

    /// Remap through `curve` and scale by `height_multiplier` to get world-space heights.
    pub fn curve(&self, curve: &HeightCurve, height_multiplier: f64) -> CurvedField {
        CurvedField(
            self.0
                .map(|v| curve.evaluate(clamp_unit(v)) * height_multiplier),
        )
    }
}

/// World-space heights: curve output times the height multiplier.
#[derive(Clone, Debug, PartialEq)]
pub struct CurvedField(HeightField);

impl CurvedField {
    /// The underlying samples.
    pub fn field(&self) -> &HeightField {
        &self.0
    }

    /// Consume the stage, returning its samples.
    pub fn into_inner(self) -> HeightField {
        self.0
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
