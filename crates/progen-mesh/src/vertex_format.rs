//! Canonical `wgpu::VertexBufferLayout` for terrain rendering.
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | normal   |
//! | 2        | 24     | Float32x3 | color    |

use std::mem;

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::packed::GpuVertex;

/// Vertex attributes covering all 36 bytes of [`GpuVertex`].
pub const TERRAIN_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 24,
        shader_location: 2,
    },
];

/// The vertex buffer layout for terrain pipelines.
pub const TERRAIN_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<GpuVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &TERRAIN_VERTEX_ATTRIBUTES,
};

/// Owned copy of [`TERRAIN_VERTEX_LAYOUT`].
pub fn terrain_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    TERRAIN_VERTEX_LAYOUT
}

const _: () = assert!(
    mem::size_of::<GpuVertex>() == 36,
    "GpuVertex size changed, update TERRAIN_VERTEX_LAYOUT"
);
const _: () = assert!(mem::offset_of!(GpuVertex, position) == 0);
const _: () = assert!(mem::offset_of!(GpuVertex, normal) == 12);
const _: () = assert!(mem::offset_of!(GpuVertex, color) == 24);
