//! Terrain mesh data: one vertex per grid cell plus a triangle list.

use glam::Vec3;

use crate::packed::GpuVertex;

/// A single terrain vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// World-space position.
    pub position: Vec3,
    /// Smooth shading normal, unit length after [`crate::compute_normals`].
    pub normal: Vec3,
    /// Biome color, RGB in `[0, 1]`.
    pub color: Vec3,
}

/// The output of a meshing pass.
///
/// Vertices are ordered row-major (`z * width + x`); every triangle winds
/// counter-clockwise when seen from above.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex buffer.
    pub vertices: Vec<Vertex>,
    /// Triangle list.
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the mesh contains no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Flattened index buffer, three indices per triangle.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Vertices in the interleaved upload format.
    pub fn to_gpu_vertices(&self) -> Vec<GpuVertex> {
        self.vertices.iter().map(GpuVertex::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        let vertex = |x: f32, z: f32| Vertex {
            position: Vec3::new(x, 0.0, z),
            normal: Vec3::Y,
            color: Vec3::ONE,
        };
        Mesh {
            vertices: vec![
                vertex(0.0, 0.0),
                vertex(1.0, 0.0),
                vertex(0.0, 1.0),
                vertex(1.0, 1.0),
            ],
            triangles: vec![[0, 2, 3], [0, 3, 1]],
        }
    }

    #[test]
    fn test_counts() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(!mesh.is_empty());
        assert!(Mesh::new().is_empty());
    }

    #[test]
    fn test_flat_indices_preserve_order() {
        assert_eq!(quad().indices(), vec![0, 2, 3, 0, 3, 1]);
    }

    #[test]
    fn test_gpu_vertices_match_source() {
        let mesh = quad();
        let gpu = mesh.to_gpu_vertices();
        assert_eq!(gpu.len(), 4);
        assert_eq!(gpu[3].position, [1.0, 0.0, 1.0]);
        assert_eq!(gpu[3].normal, [0.0, 1.0, 0.0]);
        assert_eq!(gpu[3].color, [1.0, 1.0, 1.0]);
    }
}
