//! Terrain meshing: grid triangulation, smooth normals, GPU vertex layout,
//! and the end-to-end terrain generator.

mod builder;
mod error;
mod mesh;
pub mod packed;
mod terrain;
pub mod vertex_format;

pub use builder::{GridSpec, MeshBuilder, compute_normals};
pub use error::MeshError;
pub use mesh::{Mesh, Vertex};
pub use packed::GpuVertex;
pub use terrain::{GeneratedTerrain, TerrainGenerator};
pub use vertex_format::{TERRAIN_VERTEX_ATTRIBUTES, TERRAIN_VERTEX_LAYOUT, terrain_vertex_buffer_layout};
