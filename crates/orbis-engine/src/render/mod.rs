//! Layered line rendering.
//!
//! A frame has two layers drawn into one pass: the world layer (depth-tested,
//! transformed by the orbit camera) and the HUD layer (clip space, identity
//! transform, always on top). Content sources supply both as lists of
//! line-list [`DrawItem`]s; [`FrameCompositor`] decides which layers run and
//! in what order.
//!
//! Convention:
//! - positions are homogeneous `[x, y, z, 1]`; HUD positions are clip space.
//! - topology is always a line list (two vertices per segment).

mod backend;
mod compositor;
mod content;
mod error;
mod grid;
mod item;
mod line_renderer;
mod lines;
mod mode;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{Acquire, GpuApi, LineBackend};
pub use compositor::{CompositorConfig, FrameCompositor, FrameOutcome, FrameStats};
pub use content::ContentSource;
pub use error::CompositorError;
pub use grid::GridConfig;
pub use item::{DrawItem, LineVertex};
pub use line_renderer::{create_line_item, LineFrame, LineRenderer, Wgpu, WgpuLineBackend};
pub use lines::{
    circle_points, clip_circle_line_list, polyline_to_line_list, ring_line_list, PolylineSpace,
};
pub use mode::{Layer, ParseRenderModeError, RenderMode};
