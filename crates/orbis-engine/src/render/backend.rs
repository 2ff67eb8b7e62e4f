use glam::Mat4;

use super::item::{DrawItem, LineVertex};
use super::mode::Layer;
use super::CompositorError;
use crate::coords::ViewportSize;

/// Resource types shared by a GPU backend and the content it draws.
///
/// Content sources are written against an API, not a concrete backend, so
/// the same provider can feed the wgpu renderer and a recording test double.
pub trait GpuApi {
    /// Handle passed to content sources when they (re)build their buffers.
    type Device;
    /// Vertex buffer handle carried by a [`DrawItem`].
    type Buffer;
}

/// Result of asking the presentation surface for a frame target.
#[derive(Debug)]
pub enum Acquire<F> {
    /// A frame target is ready for recording.
    Frame(F),
    /// Transiently unavailable (timeout, surface just reconfigured); skip this frame.
    Skip,
    /// The surface cannot recover (out of memory).
    Fatal,
}

/// The GPU operations the frame compositor drives.
///
/// A frame is: one `acquire_frame`, then per active layer one `bind_layer`
/// followed by zero or more `draw_lines`, then `present`.
pub trait LineBackend {
    type Api: GpuApi;
    type Frame;

    /// Device handle forwarded to content sources.
    fn device(&self) -> &<Self::Api as GpuApi>::Device;

    /// Current drawable size.
    fn surface_size(&self) -> ViewportSize;

    /// Builds the line-list pipelines and the transform uniform buffer.
    ///
    /// Fails with [`CompositorError::MissingCapability`] when the surface or
    /// device cannot support them.
    fn prepare(&mut self) -> Result<(), CompositorError>;

    /// Uploads a static vertex buffer owned by the compositor.
    fn create_line_buffer(
        &mut self,
        label: &str,
        vertices: &[LineVertex],
    ) -> Option<DrawItem<<Self::Api as GpuApi>::Buffer>>;

    fn acquire_frame(&mut self) -> Acquire<Self::Frame>;

    /// Writes `transform` into the layer's uniform slot and binds the layer's pipeline.
    fn bind_layer(&mut self, frame: &mut Self::Frame, layer: Layer, transform: &Mat4);

    /// Issues one line-list draw of `vertex_count` vertices from `buffer`.
    fn draw_lines(
        &mut self,
        frame: &mut Self::Frame,
        buffer: &<Self::Api as GpuApi>::Buffer,
        vertex_count: u32,
    );

    /// Submits the recorded commands and presents the frame.
    fn present(&mut self, frame: Self::Frame);
}
