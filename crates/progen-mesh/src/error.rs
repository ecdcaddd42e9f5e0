//! Mesh construction error types.

use progen_terrain::TerrainError;

/// Errors that stop a mesh from being built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// The vertex grid is too small to triangulate.
    #[error("invalid mesh grid {width}x{height}: at least 2x2 vertices are required")]
    InvalidGrid {
        /// Vertex columns.
        width: usize,
        /// Vertex rows.
        height: usize,
    },

    /// A height field does not match the vertex grid.
    #[error("field is {found:?} but the grid is {expected:?}")]
    FieldSizeMismatch {
        /// Grid `(width, height)`.
        expected: (usize, usize),
        /// Field `(width, height)`.
        found: (usize, usize),
    },

    /// The grid has more vertices than a `u32` index can address.
    #[error("{vertices} vertices exceed the u32 index range")]
    IndexOverflow {
        /// Requested vertex count.
        vertices: usize,
    },

    /// A terrain stage failed.
    #[error(transparent)]
    Terrain(#[from] TerrainError),
}
