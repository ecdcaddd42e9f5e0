//! Cubic Bézier height curves.
//!
//! A curve runs from `(0, 0)` to `(1, 1)` through two interior control points
//! `(x1, y1)` and `(x2, y2)`. Evaluating at `t` finds the Bézier parameter whose
//! x-coordinate equals `t` and returns the matching y.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 64;
const SOLVE_EPSILON: f64 = 1e-9;

/// A monotonic easing curve used to reshape normalized elevation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightCurve {
    /// First control point, x.
    pub x1: f64,
    /// First control point, y.
    pub y1: f64,
    /// Second control point, x.
    pub x2: f64,
    /// Second control point, y.
    pub y2: f64,
}

impl HeightCurve {
    /// The identity curve.
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a curve from its two interior control points.
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a curve from `[x1, y1, x2, y2]`.
    pub const fn from_control_points(points: [f64; 4]) -> Self {
        Self::new(points[0], points[1], points[2], points[3])
    }

    /// Returns `[x1, y1, x2, y2]`.
    pub fn control_points(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Whether all control points lie in the unit square, which guarantees a
    /// monotonic curve.
    pub fn is_monotonic(&self) -> bool {
        self.control_points()
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }

    /// Evaluate the curve at `t`.
    ///
    /// `t` is clamped to `[0, 1]` and so is the result. Control x-coordinates
    /// outside `[0, 1]` are clamped before solving; non-finite control points
    /// fall back to the linear curve.
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let curve = self.sanitized();

        let x = Coefficients::new(curve.x1, curve.x2);
        let y = Coefficients::new(curve.y1, curve.y2);
        let s = x.solve(t);
        y.sample(s).clamp(0.0, 1.0)
    }

    fn sanitized(&self) -> Self {
        if self.control_points().iter().any(|v| !v.is_finite()) {
            return Self::LINEAR;
        }
        Self {
            x1: self.x1.clamp(0.0, 1.0),
            y1: self.y1,
            x2: self.x2.clamp(0.0, 1.0),
            y2: self.y2,
        }
    }
}

impl Default for HeightCurve {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl From<CurvePreset> for HeightCurve {
    fn from(preset: CurvePreset) -> Self {
        preset.curve()
    }
}

/// Polynomial form of one Bézier coordinate with endpoints 0 and 1.
struct Coefficients {
    a: f64,
    b: f64,
    c: f64,
}

impl Coefficients {
    fn new(p1: f64, p2: f64) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        Self { a, b, c }
    }

    #[inline]
    fn sample(&self, s: f64) -> f64 {
        ((self.a * s + self.b) * s + self.c) * s
    }

    #[inline]
    fn derivative(&self, s: f64) -> f64 {
        (3.0 * self.a * s + 2.0 * self.b) * s + self.c
    }

    /// Find `s` in `[0, 1]` with `sample(s) == target`. Newton first, then
    /// bisection when the slope vanishes.
    fn solve(&self, target: f64) -> f64 {
        let mut s = target;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.sample(s) - target;
            if err.abs() < SOLVE_EPSILON {
                return s;
            }
            let slope = self.derivative(s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
            if !(0.0..=1.0).contains(&s) {
                break;
            }
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        s = target;
        for _ in 0..BISECTION_ITERATIONS {
            let x = self.sample(s);
            if (x - target).abs() < SOLVE_EPSILON {
                break;
            }
            if x < target {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        s.clamp(0.0, 1.0)
    }
}

/// Named easing presets for [`HeightCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurvePreset {
    /// `y = x`.
    Linear,
    /// Slow start: flattens lowlands.
    EaseInSine,
    /// Fast start: lifts lowlands.
    EaseOutSine,
    /// Flat at both ends.
    EaseInOutSine,
    /// Strongly flattened lowlands, steep peaks.
    EaseInCubic,
    /// Strongly raised lowlands, flat plateaus.
    EaseOutCubic,
}

impl CurvePreset {
    /// Every preset, in display order.
    pub const ALL: [CurvePreset; 6] = [
        CurvePreset::Linear,
        CurvePreset::EaseInSine,
        CurvePreset::EaseOutSine,
        CurvePreset::EaseInOutSine,
        CurvePreset::EaseInCubic,
        CurvePreset::EaseOutCubic,
    ];

    /// The control points of this preset.
    pub const fn curve(self) -> HeightCurve {
        match self {
            CurvePreset::Linear => HeightCurve::LINEAR,
            CurvePreset::EaseInSine => HeightCurve::new(0.47, 0.0, 0.745, 0.715),
            CurvePreset::EaseOutSine => HeightCurve::new(0.39, 0.575, 0.565, 1.0),
            CurvePreset::EaseInOutSine => HeightCurve::new(0.445, 0.05, 0.55, 0.95),
            CurvePreset::EaseInCubic => HeightCurve::new(0.55, 0.055, 0.675, 0.19),
            CurvePreset::EaseOutCubic => HeightCurve::new(0.215, 0.61, 0.355, 1.0),
        }
    }

    /// Snake-case name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            CurvePreset::Linear => "linear",
            CurvePreset::EaseInSine => "ease_in_sine",
            CurvePreset::EaseOutSine => "ease_out_sine",
            CurvePreset::EaseInOutSine => "ease_in_out_sine",
            CurvePreset::EaseInCubic => "ease_in_cubic",
            CurvePreset::EaseOutCubic => "ease_out_cubic",
        }
    }
}

impl fmt::Display for CurvePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurvePreset {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == normalized)
            .ok_or_else(|| TerrainError::UnknownCurvePreset(s.to_string()))
    }
}
