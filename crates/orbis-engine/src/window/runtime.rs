use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{GestureConfig, InputFrame, InputState, Key};
use crate::paint::Color;
use crate::render::{
    CompositorConfig, CompositorError, ContentSource, FrameCompositor, FrameOutcome, LineRenderer,
    RenderMode, Wgpu, WgpuLineBackend,
};
use crate::time::FpsMeter;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub mode: RenderMode,
    pub compositor: CompositorConfig,
    pub gestures: GestureConfig,
    pub clear_color: Color,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "orbis".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            mode: RenderMode::Both,
            compositor: CompositorConfig::with_grid(),
            gestures: GestureConfig::default(),
            clear_color: Color::rgb(0.06, 0.06, 0.08),
        }
    }
}

/// Host-level actions bound to keys.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum HostCommand {
    SetMode(RenderMode),
    ResetCamera,
    Exit,
}

fn command_for_key(key: Key) -> Option<HostCommand> {
    match key {
        Key::Digit1 => Some(HostCommand::SetMode(RenderMode::HudOnly)),
        Key::Digit2 => Some(HostCommand::SetMode(RenderMode::WorldOnly)),
        Key::Digit3 => Some(HostCommand::SetMode(RenderMode::Both)),
        Key::R => Some(HostCommand::ResetCamera),
        Key::Escape => Some(HostCommand::Exit),
        _ => None,
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and renders `content` into it until the window closes.
    pub fn run<C>(config: RuntimeConfig, gpu_init: GpuInit, content: C) -> Result<()>
    where
        C: ContentSource<Wgpu> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, content);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    renderer: LineRenderer,
    input_state: InputState,
    input_frame: InputFrame,
    fps: FpsMeter,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<C>
where
    C: ContentSource<Wgpu> + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,

    /// Held until the compositor is configured, then owned by it.
    content: Option<C>,
    compositor: FrameCompositor<Wgpu, C>,

    window: Option<WindowEntry>,
    exit_requested: bool,
    failure: Option<anyhow::Error>,
}

impl<C> AppState<C>
where
    C: ContentSource<Wgpu> + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, content: C) -> Self {
        Self {
            compositor: FrameCompositor::new(config.compositor.clone()),
            config,
            gpu_init,
            content: Some(content),
            window: None,
            exit_requested: false,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let mut entry = WindowEntryTryBuilder {
            renderer: LineRenderer::new(self.config.clear_color),
            input_state: InputState::new(self.config.gestures.clone()),
            input_frame: InputFrame::default(),
            fps: FpsMeter::new(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let content = self
            .content
            .take()
            .context("content source was already handed to the compositor")?;

        let (compositor, mode) = (&mut self.compositor, self.config.mode);
        entry
            .with_mut(|f| {
                let mut backend = WgpuLineBackend::new(f.gpu, f.renderer, f.window);
                compositor.configure(&mut backend, mode, content)
            })
            .context("failed to configure frame compositor")?;

        entry.with_window(|w| w.request_redraw());
        self.window = Some(entry);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let (compositor, Some(entry)) = (&mut self.compositor, self.window.as_mut()) else {
            return;
        };

        entry.with_mut(|f| {
            f.gpu.resize(size);
            if size.width == 0 || size.height == 0 {
                log::debug!("window minimized; resources kept");
                return;
            }
            let backend = WgpuLineBackend::new(f.gpu, f.renderer, f.window);
            compositor.resize(&backend, size.into());
            f.window.request_redraw();
        });
    }

    fn redraw(&mut self) -> Result<(), CompositorError> {
        let (compositor, title, Some(entry)) =
            (&mut self.compositor, &self.config.title, self.window.as_mut())
        else {
            return Ok(());
        };

        let mut exit = false;

        let result = entry.with_mut(|f| -> Result<(), CompositorError> {
            for gesture in f.input_frame.gestures.drain(..) {
                compositor.apply_gesture(gesture);
            }
            for key in f.input_frame.keys_pressed.drain(..) {
                match command_for_key(key) {
                    Some(HostCommand::SetMode(mode)) => compositor.set_mode(mode),
                    Some(HostCommand::ResetCamera) => {
                        compositor.camera_mut().reset();
                        log::info!("camera reset");
                    }
                    Some(HostCommand::Exit) => exit = true,
                    None => {}
                }
            }

            let viewport = f.gpu.size().into();
            let mut backend = WgpuLineBackend::new(f.gpu, f.renderer, f.window);
            let outcome = compositor.render_frame(&mut backend, viewport, Instant::now())?;

            if let FrameOutcome::Presented(stats) = outcome {
                if let Some(fps) = f.fps.tick(Instant::now()) {
                    log::debug!(
                        "{fps:.1} fps, {} draws, {} vertices",
                        stats.draw_calls,
                        stats.vertices
                    );
                    f.window
                        .set_title(&format!("{title} | {fps:.0} fps | {}", compositor.mode()));
                }
            }
            Ok(())
        });

        if exit {
            self.exit_requested = true;
        }
        result
    }
}

impl<C> ApplicationHandler for AppState<C>
where
    C: ContentSource<Wgpu> + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: content animates every frame.
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        entry.with_mut(|f| {
            if let Some(ev) = translate_window_event(f.window, &event) {
                f.input_state.apply_event(f.input_frame, ev);
            }
        });

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.window = None;
                self.exit_requested = true;
            }

            WindowEvent::Resized(size) => self.resize(size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry_inner_size(self.window.as_ref());
                if let Some(size) = size {
                    self.resize(size);
                }
            }

            WindowEvent::RedrawRequested => match self.redraw() {
                Ok(()) => {}
                Err(CompositorError::SurfaceLost) => {
                    self.fail(event_loop, anyhow::anyhow!(CompositorError::SurfaceLost));
                }
                Err(e) => self.fail(event_loop, anyhow::Error::new(e).context("frame failed")),
            },

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}

fn entry_inner_size(entry: Option<&WindowEntry>) -> Option<PhysicalSize<u32>> {
    entry.map(|e| e.with_window(|w| w.inner_size()))
}
