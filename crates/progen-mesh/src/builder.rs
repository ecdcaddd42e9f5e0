//! Grid triangulation and smooth normal accumulation.

use glam::Vec3;
use progen_terrain::{Biome, BiomeTable, CurvedField, HeightField, ShapedField};
use tracing::{debug, warn};

use crate::error::MeshError;
use crate::mesh::{Mesh, Vertex};

/// Vertex grid dimensions and the world-space area it covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    width: usize,
    height: usize,
    span_width: f32,
    span_length: f32,
}

impl GridSpec {
    /// Describe a `width x height` vertex grid spanning
    /// `[-span_width/2, span_width/2] x [-span_length/2, span_length/2]`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidGrid`] if either dimension is below 2 and
    /// [`MeshError::IndexOverflow`] if the vertex count does not fit in `u32`.
    pub fn new(
        width: usize,
        height: usize,
        span_width: f32,
        span_length: f32,
    ) -> Result<Self, MeshError> {
        if width < 2 || height < 2 {
            return Err(MeshError::InvalidGrid { width, height });
        }
        let vertices = width
            .checked_mul(height)
            .ok_or(MeshError::IndexOverflow { vertices: usize::MAX })?;
        if u32::try_from(vertices).is_err() {
            return Err(MeshError::IndexOverflow { vertices });
        }
        Ok(Self {
            width,
            height,
            span_width,
            span_length,
        })
    }

    /// Vertex columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Vertex rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// `width * height`.
    pub fn vertex_count(&self) -> usize {
        self.width * self.height
    }

    /// `2 * (width - 1) * (height - 1)`.
    pub fn triangle_count(&self) -> usize {
        2 * (self.width - 1) * (self.height - 1)
    }

    /// Horizontal position of grid point `(x, z)` at height zero.
    pub fn position(&self, x: usize, z: usize) -> Vec3 {
        let u = x as f32 / (self.width - 1) as f32;
        let v = z as f32 / (self.height - 1) as f32;
        Vec3::new(
            u * self.span_width - self.span_width * 0.5,
            0.0,
            v * self.span_length - self.span_length * 0.5,
        )
    }

    fn check_field(&self, field: &HeightField) -> Result<(), MeshError> {
        let found = field.dimensions();
        if found != self.dimensions() {
            return Err(MeshError::FieldSizeMismatch {
                expected: self.dimensions(),
                found,
            });
        }
        Ok(())
    }
}

/// Turns per-cell heights and biome colors into a triangle mesh.
#[derive(Clone, Copy, Debug)]
pub struct MeshBuilder {
    grid: GridSpec,
}

impl MeshBuilder {
    /// Create a builder for `grid`.
    pub fn new(grid: GridSpec) -> Self {
        Self { grid }
    }

    /// The grid this builder triangulates.
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Build the mesh.
    ///
    /// `heights` supplies world-space y. Colors come from classifying the
    /// pre-curve `shaped` value, clamped to `[0, 1]`. Normals are computed
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::FieldSizeMismatch`] if either field does not match the grid.
    pub fn build(
        &self,
        shaped: &ShapedField,
        heights: &CurvedField,
        biomes: &BiomeTable,
    ) -> Result<Mesh, MeshError> {
        let grid = &self.grid;
        grid.check_field(shaped.field())?;
        grid.check_field(heights.field())?;

        let (w, h) = grid.dimensions();
        let mut vertices = Vec::with_capacity(grid.vertex_count());
        let mut misses = 0usize;
        for z in 0..h {
            for x in 0..w {
                let mut position = grid.position(x, z);
                position.y = heights.field().get(x, z) as f32;
                let color = biomes
                    .classify_index(shaped.unit_value(x, z))
                    .and_then(|i| biomes.get(i))
                    .map_or_else(
                        || {
                            misses += 1;
                            biomes.fallback()
                        },
                        Biome::color,
                    );
                vertices.push(Vertex {
                    position,
                    normal: Vec3::ZERO,
                    color,
                });
            }
        }
        if misses > 0 {
            debug!(misses, "vertices outside every biome band use the fallback color");
        }

        let mut mesh = Mesh {
            vertices,
            triangles: grid_triangles(w, h),
        };
        compute_normals(&mut mesh);
        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "built terrain mesh"
        );
        Ok(mesh)
    }
}

/// Two counter-clockwise triangles per grid quad, row-major.
///
/// Callers guarantee `w * h` fits in `u32`.
fn grid_triangles(w: usize, h: usize) -> Vec<[u32; 3]> {
    let w32 = w as u32;
    let mut triangles = Vec::with_capacity(2 * (w - 1) * (h - 1));
    for z in 0..h - 1 {
        for x in 0..w - 1 {
            let vi = (z * w + x) as u32;
            triangles.push([vi, vi + w32, vi + w32 + 1]);
            triangles.push([vi, vi + w32 + 1, vi + 1]);
        }
    }
    triangles
}

/// Recompute smooth vertex normals from the triangle list.
///
/// Each triangle's unit face normal `(b - a) x (c - a)` is added to its three
/// vertices, then every sum is renormalized. Vertices whose sum vanishes,
/// including vertices no triangle references, get `+Y`.
pub fn compute_normals(mesh: &mut Mesh) {
    for v in &mut mesh.vertices {
        v.normal = Vec3::ZERO;
    }

    let mut skipped = 0usize;
    for tri in &mesh.triangles {
        let [a, b, c] = tri.map(|i| i as usize);
        let (Some(va), Some(vb), Some(vc)) =
            (mesh.vertices.get(a), mesh.vertices.get(b), mesh.vertices.get(c))
        else {
            skipped += 1;
            continue;
        };
        let face = (vb.position - va.position)
            .cross(vc.position - va.position)
            .normalize_or_zero();
        for i in [a, b, c] {
            mesh.vertices[i].normal += face;
        }
    }
    if skipped > 0 {
        warn!(skipped, "triangles with out-of-range indices ignored");
    }

    for v in &mut mesh.vertices {
        v.normal = v.normal.try_normalize().unwrap_or(Vec3::Y);
    }
}
