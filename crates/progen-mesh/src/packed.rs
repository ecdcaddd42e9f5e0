//! Interleaved vertex format for GPU upload.
//!
//! [`GpuVertex`] is a plain `#[repr(C)]` struct of nine `f32`s so a slice of
//! them can be handed to a vertex buffer with [`bytemuck::cast_slice`].

use crate::mesh::Vertex;

/// A terrain vertex laid out for a vertex buffer.
///
/// Layout (36 bytes total):
///   - `[0..12]`  position `[f32; 3]`
///   - `[12..24]` normal `[f32; 3]`
///   - `[24..36]` color `[f32; 3]`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Unit shading normal.
    pub normal: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

static_assertions::assert_eq_size!(GpuVertex, [u8; 36]);

impl From<&Vertex> for GpuVertex {
    fn from(v: &Vertex) -> Self {
        Self {
            position: v.position.to_array(),
            normal: v.normal.to_array(),
            color: v.color.to_array(),
        }
    }
}

impl GpuVertex {
    /// View a vertex slice as raw bytes for upload.
    pub fn as_bytes(vertices: &[GpuVertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}
