//! World-space terrain settings applied on top of a noise field.

use serde::{Deserialize, Serialize};

use crate::curve::HeightCurve;

/// How a normalized field becomes a terrain surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// World-space extent along x. The mesh spans `[-span_width/2, span_width/2]`.
    pub span_width: f32,
    /// World-space extent along z. The mesh spans `[-span_length/2, span_length/2]`.
    pub span_length: f32,
    /// Multiplier applied after the height curve.
    pub height_multiplier: f64,
    /// Subtract the falloff mask to shape an island.
    pub use_falloff: bool,
    /// Remapping applied to normalized heights.
    pub curve: HeightCurve,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            span_width: 10.0,
            span_length: 10.0,
            height_multiplier: 1.0,
            use_falloff: false,
            curve: HeightCurve::LINEAR,
        }
    }
}
