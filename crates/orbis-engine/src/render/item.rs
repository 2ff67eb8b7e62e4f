use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

/// Line-list vertex: homogeneous position plus straight-alpha color.
///
/// Layout (32 bytes):
///
///  offset  0  position  [f32; 4]   loc 0
///  offset 16  color     [f32; 4]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl LineVertex {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, color: Color) -> Self {
        Self {
            position: [x, y, z, 1.0],
            color: color.to_array(),
        }
    }
}

/// A GPU vertex buffer plus the number of vertices to draw from it.
///
/// Topology is always a line list: vertices `2k` and `2k + 1` form segment `k`.
/// Items are owned by their content source; the compositor only borrows them
/// for the duration of one frame.
#[derive(Debug, Clone)]
pub struct DrawItem<B> {
    pub buffer: B,
    pub vertex_count: u32,
}

impl<B> DrawItem<B> {
    #[inline]
    pub fn new(buffer: B, vertex_count: u32) -> Self {
        Self { buffer, vertex_count }
    }

    /// Empty items are skipped by the compositor instead of reaching the GPU.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Number of independent segments this item draws.
    #[inline]
    pub fn segment_count(&self) -> u32 {
        self.vertex_count / 2
    }
}
