//! Square falloff mask for island shaping.
//!
//! Each cell maps to `[-1, 1]` on both axes; the Chebyshev distance
//! `d = max(|x|, |y|)` feeds the sigmoid `d^a / (d^a + (b - b*d)^a)`. The
//! result is 0 at the center and reaches 1 along the outer border.

use crate::error::TerrainError;
use crate::field::HeightField;

/// Generator for a seed-independent edge attenuation mask.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FalloffMask {
    /// Steepness exponent `a`. Default: 3.0.
    pub exponent: f64,
    /// Shift `b` controlling how far the plateau extends toward the edge. Default: 2.2.
    pub edge_bias: f64,
}

impl Default for FalloffMask {
    fn default() -> Self {
        Self {
            exponent: 3.0,
            edge_bias: 2.2,
        }
    }
}

impl FalloffMask {
    /// Evaluate the mask curve at Chebyshev distance `d` (clamped to `[0, 1]`).
    pub fn evaluate(&self, d: f64) -> f64 {
        let d = d.clamp(0.0, 1.0);
        let inner = d.powf(self.exponent);
        let outer = (self.edge_bias - self.edge_bias * d).powf(self.exponent);
        let denom = inner + outer;
        if denom > 0.0 { inner / denom } else { 0.0 }
    }

    /// Generate a `width x height` mask in `[0, 1]`.
    ///
    /// Column `j` maps to `x = 2j/width - 1`, so column 0 sits on the border
    /// and the cell at `width / 2` sits on the center line.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimensions`] if either dimension is zero.
    pub fn generate(&self, width: usize, height: usize) -> Result<HeightField, TerrainError> {
        HeightField::from_fn(width, height, |col, row| {
            let x = (col as f64 / width as f64) * 2.0 - 1.0;
            let y = (row as f64 / height as f64) * 2.0 - 1.0;
            self.evaluate(x.abs().max(y.abs()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_zero() {
        let mask = FalloffMask::default().generate(64, 64).unwrap();
        assert_eq!(mask.get(32, 32), 0.0);
    }

    #[test]
    fn test_corners_near_one() {
        let (w, h) = (64, 48);
        let mask = FalloffMask::default().generate(w, h).unwrap();
        for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
            let v = mask.get(x, y);
            assert!(v > 0.9, "corner ({x}, {y}) = {v}, expected > 0.9");
        }
        assert_eq!(mask.get(0, 0), 1.0);
    }

    #[test]
    fn test_values_in_unit_range() {
        let mask = FalloffMask::default().generate(37, 23).unwrap();
        for &v in mask.values() {
            assert!((0.0..=1.0).contains(&v), "mask value {v} outside [0, 1]");
        }
    }

    #[test]
    fn test_monotonic_toward_edge() {
        let falloff = FalloffMask::default();
        let mut prev = falloff.evaluate(0.0);
        for i in 1..=100 {
            let v = falloff.evaluate(i as f64 / 100.0);
            assert!(v >= prev, "falloff decreased at d={}", i as f64 / 100.0);
            prev = v;
        }
    }

    #[test]
    fn test_square_contours() {
        // Chebyshev distance: (edge, center-row) matches (edge, edge-row) distance.
        let falloff = FalloffMask::default();
        let mask = falloff.generate(20, 20).unwrap();
        assert_eq!(mask.get(2, 10), mask.get(2, 5));
        assert_eq!(mask.get(2, 10), falloff.evaluate(0.8));
    }

    #[test]
    fn test_zero_edge_bias_does_not_produce_nan() {
        let falloff = FalloffMask {
            exponent: 3.0,
            edge_bias: 0.0,
        };
        assert_eq!(falloff.evaluate(0.0), 0.0);
        assert_eq!(falloff.evaluate(0.5), 1.0);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(FalloffMask::default().generate(0, 10).is_err());
    }

    #[test]
    fn test_rejects_oversized() {
        assert!(matches!(
            FalloffMask::default().generate(1 << 40, 1 << 30),
            Err(TerrainError::InvalidDimensions { .. })
        ));
    }
}
