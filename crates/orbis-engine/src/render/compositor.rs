use std::time::Instant;

use glam::Mat4;

use super::backend::{Acquire, GpuApi, LineBackend};
use super::content::ContentSource;
use super::error::CompositorError;
use super::grid::GridConfig;
use super::item::DrawItem;
use super::mode::{Layer, RenderMode};
use crate::camera::{CameraConfig, Gesture, OrbitCamera, OrbitGestures};
use crate::coords::ViewportSize;
use crate::time::FrameClock;

/// Frame compositor configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositorConfig {
    pub camera: CameraConfig,

    /// Reference grid drawn first in the world layer; `None` disables it.
    pub grid: Option<GridConfig>,
}

impl CompositorConfig {
    /// Default camera plus the default ground grid.
    pub fn with_grid() -> Self {
        Self {
            camera: CameraConfig::default(),
            grid: Some(GridConfig::default()),
        }
    }
}

/// Draw statistics for one presented frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub draw_calls: u32,
    pub vertices: u64,
}

/// What happened to a `render_frame` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Presented(FrameStats),
    /// No frame target was available; the next tick retries.
    Skipped,
}

enum State<A: GpuApi, C> {
    Uninitialized,
    Ready {
        content: C,
        grid: Option<DrawItem<A::Buffer>>,
    },
}

/// Per-frame orchestrator for the HUD and world layers.
///
/// Owns the orbit camera, the frame clock and the render mode. Starts
/// uninitialized; `configure` moves it to ready exactly once. Every frame:
/// tick the clock, update content, acquire a target, draw the world layer
/// (grid, then world items) and then the HUD layer, present.
pub struct FrameCompositor<A: GpuApi, C> {
    config: CompositorConfig,
    camera: OrbitCamera,
    clock: FrameClock,
    mode: RenderMode,
    state: State<A, C>,
}

impl<A, C> FrameCompositor<A, C>
where
    A: GpuApi,
    C: ContentSource<A>,
{
    pub fn new(config: CompositorConfig) -> Self {
        Self {
            camera: OrbitCamera::new(config.camera.clone()),
            clock: FrameClock::new(),
            mode: RenderMode::default(),
            state: State::Uninitialized,
            config,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready { .. })
    }

    /// Builds GPU state, captures the content source and builds its initial
    /// resources for the backend's current surface size.
    ///
    /// On failure the compositor stays uninitialized.
    pub fn configure<B>(
        &mut self,
        backend: &mut B,
        mode: RenderMode,
        mut content: C,
    ) -> Result<(), CompositorError>
    where
        B: LineBackend<Api = A>,
    {
        if self.is_ready() {
            return Err(CompositorError::AlreadyConfigured);
        }

        backend.prepare()?;

        let grid = self
            .config
            .grid
            .as_ref()
            .and_then(|g| backend.create_line_buffer("orbis reference grid", &g.line_list()));

        let size = backend.surface_size();
        content.build_resources(backend.device(), size);

        self.mode = mode;
        self.state = State::Ready { content, grid };

        log::info!(
            "compositor configured: {}x{} mode={mode} grid={}",
            size.width,
            size.height,
            self.config.grid.is_some()
        );
        Ok(())
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Takes effect at the start of the next frame.
    pub fn set_mode(&mut self, mode: RenderMode) {
        if mode != self.mode {
            log::info!("render mode {} -> {mode}", self.mode);
        }
        self.mode = mode;
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn apply_gesture(&mut self, gesture: Gesture) {
        OrbitGestures::apply(&mut self.camera, gesture);
    }

    /// Forwards a pan gesture (surface-local units) to the camera.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.apply_gesture(Gesture::Pan { dx, dy });
    }

    /// Forwards a magnification gesture to the camera.
    pub fn zoom(&mut self, factor: f32) {
        self.apply_gesture(Gesture::Zoom { factor });
    }

    /// The configured content source, if any.
    pub fn content(&self) -> Option<&C> {
        match &self.state {
            State::Ready { content, .. } => Some(content),
            State::Uninitialized => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut C> {
        match &mut self.state {
            State::Ready { content, .. } => Some(content),
            State::Uninitialized => None,
        }
    }

    /// Rebuilds content resources for a new viewport size.
    ///
    /// The transform uniform buffer is fixed-size and left untouched. Before
    /// `configure` this is a no-op; the configure-time size is used instead.
    pub fn resize<B>(&mut self, backend: &B, size: ViewportSize)
    where
        B: LineBackend<Api = A>,
    {
        let State::Ready { content, .. } = &mut self.state else {
            log::debug!("resize to {}x{} before configure ignored", size.width, size.height);
            return;
        };

        log::info!("viewport resized to {}x{}", size.width, size.height);
        content.build_resources(backend.device(), size);
    }

    /// Renders one frame.
    ///
    /// Content is updated even when the frame target turns out to be
    /// unavailable; such a frame is skipped whole and reported as
    /// [`FrameOutcome::Skipped`].
    pub fn render_frame<B>(
        &mut self,
        backend: &mut B,
        viewport: ViewportSize,
        now: Instant,
    ) -> Result<FrameOutcome, CompositorError>
    where
        B: LineBackend<Api = A>,
    {
        let State::Ready { content, grid } = &mut self.state else {
            return Err(CompositorError::NotConfigured);
        };

        let mode = self.mode;
        let time = self.clock.tick(now);
        content.update(time.dt);

        let mut frame = match backend.acquire_frame() {
            Acquire::Frame(frame) => frame,
            Acquire::Skip => {
                log::trace!("frame {} skipped: no frame target", time.frame_index);
                return Ok(FrameOutcome::Skipped);
            }
            Acquire::Fatal => {
                log::error!("frame {}: presentation surface lost", time.frame_index);
                return Err(CompositorError::SurfaceLost);
            }
        };

        let mut stats = FrameStats::default();

        for layer in mode.layers() {
            match layer {
                Layer::World => {
                    let transform = self.camera.view_projection(viewport.aspect());
                    backend.bind_layer(&mut frame, Layer::World, &transform);

                    if let Some(grid) = grid.as_ref() {
                        draw_item(backend, &mut frame, grid, &mut stats);
                    }
                    for item in content.world_items() {
                        draw_item(backend, &mut frame, item, &mut stats);
                    }
                }
                Layer::Hud => {
                    backend.bind_layer(&mut frame, Layer::Hud, &Mat4::IDENTITY);

                    for item in content.hud_items() {
                        draw_item(backend, &mut frame, item, &mut stats);
                    }
                }
            }
        }

        backend.present(frame);

        log::trace!(
            "frame {} dt={:.4} mode={mode} draws={} vertices={}",
            time.frame_index,
            time.dt,
            stats.draw_calls,
            stats.vertices
        );

        Ok(FrameOutcome::Presented(stats))
    }
}

fn draw_item<B: LineBackend>(
    backend: &mut B,
    frame: &mut B::Frame,
    item: &DrawItem<<B::Api as GpuApi>::Buffer>,
    stats: &mut FrameStats,
) {
    if item.is_empty() {
        return;
    }
    backend.draw_lines(frame, &item.buffer, item.vertex_count);
    stats.draw_calls += 1;
    stats.vertices += u64::from(item.vertex_count);
}
