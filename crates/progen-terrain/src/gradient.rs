//! Improved gradient noise over a fixed permutation table.
//!
//! The evaluator is the classic improved-noise construction: quintic fade,
//! twelve gradient directions selected by the low four hash bits, and
//! trilinear blending of the eight lattice corners. The value distribution
//! is what the fractal normalization downstream is tuned for, so the formula
//! must not drift.

use noise::NoiseFn;

use crate::error::TerrainError;
use crate::field::{HeightField, NormalizedField, RawField};
use crate::fractal::MIN_SCALE;

/// The reference permutation of `0..=255`.
const REFERENCE_PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// A 256-entry permutation duplicated to 512 entries so corner hashing never
/// wraps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    p: [u8; 512],
}

impl PermutationTable {
    /// Build a table from a caller-supplied permutation of `0..=255`.
    pub fn from_permutation(permutation: [u8; 256]) -> Self {
        let mut p = [0u8; 512];
        p[..256].copy_from_slice(&permutation);
        p[256..].copy_from_slice(&permutation);
        Self { p }
    }

    #[inline]
    fn at(&self, index: usize) -> usize {
        self.p[index] as usize
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::from_permutation(REFERENCE_PERMUTATION)
    }
}

/// Stateless 3D gradient noise evaluator. Output lies roughly in `[-1, 1]`.
#[derive(Clone, Debug, Default)]
pub struct GradientNoise {
    table: PermutationTable,
}

impl GradientNoise {
    /// Create an evaluator over the reference permutation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator over a custom permutation table.
    pub fn with_table(table: PermutationTable) -> Self {
        Self { table }
    }

    /// Evaluate noise at `(x, y, z)`. Zero at every integer lattice point.
    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());

        // Unit cube containing the point.
        let xi = (fx as i64 & 255) as usize;
        let yi = (fy as i64 & 255) as usize;
        let zi = (fz as i64 & 255) as usize;

        // Position inside that cube.
        let x = x - fx;
        let y = y - fy;
        let z = z - fz;

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let p = &self.table;
        let a = p.at(xi) + yi;
        let aa = p.at(a) + zi;
        let ab = p.at(a + 1) + zi;
        let b = p.at(xi + 1) + yi;
        let ba = p.at(b) + zi;
        let bb = p.at(b + 1) + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p.at(aa), x, y, z), grad(p.at(ba), x - 1.0, y, z)),
                lerp(
                    u,
                    grad(p.at(ab), x, y - 1.0, z),
                    grad(p.at(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p.at(aa + 1), x, y, z - 1.0),
                    grad(p.at(ba + 1), x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p.at(ab + 1), x, y - 1.0, z - 1.0),
                    grad(p.at(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }

    /// Sample a single-octave map of `width x height` cells, centered on the
    /// grid midpoint and normalized to `[0, 1]`.
    ///
    /// A non-positive `scale` is clamped to [`MIN_SCALE`].
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimensions`] if either dimension is zero.
    pub fn sample_map(
        &self,
        width: usize,
        height: usize,
        scale: f64,
    ) -> Result<NormalizedField, TerrainError> {
        let scale = if scale > 0.0 { scale } else { MIN_SCALE };
        let half_w = (width / 2) as f64;
        let half_h = (height / 2) as f64;

        let field = HeightField::from_fn(width, height, |x, y| {
            self.noise((x as f64 - half_w) / scale, (y as f64 - half_h) / scale, 0.0)
        })?;
        Ok(RawField::new(field).normalize())
    }
}

impl NoiseFn<f64, 3> for GradientNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.noise(point[0], point[1], point[2])
    }
}

impl NoiseFn<f64, 2> for GradientNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.noise(point[0], point[1], 0.0)
    }
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of `(x, y, z)` with one of twelve cube-edge gradients.
#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
