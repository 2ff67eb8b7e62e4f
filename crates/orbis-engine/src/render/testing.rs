//! In-memory doubles for driving the compositor without a GPU.

use std::cell::Cell;

use glam::Mat4;

use super::backend::{Acquire, GpuApi, LineBackend};
use super::content::ContentSource;
use super::error::CompositorError;
use super::item::{DrawItem, LineVertex};
use super::mode::Layer;
use crate::coords::ViewportSize;

/// Marker API whose buffers are plain names.
pub(crate) struct Recording;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BufferId(pub String);

impl BufferId {
    pub(crate) fn new(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl GpuApi for Recording {
    type Device = ();
    type Buffer = BufferId;
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Prepare,
    CreateBuffer { label: String, vertices: usize },
    Acquire,
    Bind { layer: Layer, transform: Mat4 },
    Draw { buffer: BufferId, vertex_count: u32 },
    Present,
}

/// Backend that records every call in order.
pub(crate) struct RecordingBackend {
    device: (),
    size: ViewportSize,
    calls: Vec<Call>,
    skips: u32,
    lost: bool,
    prepare_error: Option<String>,
}

impl RecordingBackend {
    pub(crate) fn new(size: ViewportSize) -> Self {
        Self {
            device: (),
            size,
            calls: Vec::new(),
            skips: 0,
            lost: false,
            prepare_error: None,
        }
    }

    pub(crate) fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub(crate) fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub(crate) fn skip_next_acquires(&mut self, n: u32) {
        self.skips = n;
    }

    pub(crate) fn lose_surface(&mut self) {
        self.lost = true;
    }

    pub(crate) fn fail_prepare(&mut self, what: &str) {
        self.prepare_error = Some(what.to_owned());
    }

    pub(crate) fn last_transform(&self, layer: Layer) -> Option<Mat4> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Bind { layer: l, transform } if *l == layer => Some(*transform),
            _ => None,
        })
    }
}

impl LineBackend for RecordingBackend {
    type Api = Recording;
    type Frame = ();

    fn device(&self) -> &() {
        &self.device
    }

    fn surface_size(&self) -> ViewportSize {
        self.size
    }

    fn prepare(&mut self) -> Result<(), CompositorError> {
        self.calls.push(Call::Prepare);
        match &self.prepare_error {
            Some(what) => Err(CompositorError::MissingCapability(what.clone())),
            None => Ok(()),
        }
    }

    fn create_line_buffer(
        &mut self,
        label: &str,
        vertices: &[LineVertex],
    ) -> Option<DrawItem<BufferId>> {
        self.calls.push(Call::CreateBuffer {
            label: label.to_owned(),
            vertices: vertices.len(),
        });
        Some(DrawItem::new(BufferId::new(label), vertices.len() as u32))
    }

    fn acquire_frame(&mut self) -> Acquire<()> {
        self.calls.push(Call::Acquire);
        if self.lost {
            return Acquire::Fatal;
        }
        if self.skips > 0 {
            self.skips -= 1;
            return Acquire::Skip;
        }
        Acquire::Frame(())
    }

    fn bind_layer(&mut self, _frame: &mut (), layer: Layer, transform: &Mat4) {
        self.calls.push(Call::Bind {
            layer,
            transform: *transform,
        });
    }

    fn draw_lines(&mut self, _frame: &mut (), buffer: &BufferId, vertex_count: u32) {
        self.calls.push(Call::Draw {
            buffer: buffer.clone(),
            vertex_count,
        });
    }

    fn present(&mut self, _frame: ()) {
        self.calls.push(Call::Present);
    }
}

/// Content source with fixed item lists that counts how it is consulted.
pub(crate) struct ScriptedContent {
    world: Vec<DrawItem<BufferId>>,
    hud: Vec<DrawItem<BufferId>>,
    builds: Vec<ViewportSize>,
    updates: Vec<f32>,
    world_queries: Cell<u32>,
    hud_queries: Cell<u32>,
}

impl ScriptedContent {
    pub(crate) fn new(world: &[(&str, u32)], hud: &[(&str, u32)]) -> Self {
        let items = |list: &[(&str, u32)]| -> Vec<DrawItem<BufferId>> {
            list.iter()
                .map(|(name, count)| DrawItem::new(BufferId::new(name), *count))
                .collect()
        };
        Self {
            world: items(world),
            hud: items(hud),
            builds: Vec::new(),
            updates: Vec::new(),
            world_queries: Cell::new(0),
            hud_queries: Cell::new(0),
        }
    }

    pub(crate) fn builds(&self) -> &[ViewportSize] {
        &self.builds
    }

    pub(crate) fn updates(&self) -> &[f32] {
        &self.updates
    }

    pub(crate) fn world_queries(&self) -> u32 {
        self.world_queries.get()
    }

    pub(crate) fn hud_queries(&self) -> u32 {
        self.hud_queries.get()
    }
}

impl ContentSource<Recording> for ScriptedContent {
    fn build_resources(&mut self, _device: &(), viewport: ViewportSize) {
        self.builds.push(viewport);
    }

    fn update(&mut self, dt: f32) {
        self.updates.push(dt);
    }

    fn hud_items(&self) -> &[DrawItem<BufferId>] {
        self.hud_queries.set(self.hud_queries.get() + 1);
        &self.hud
    }

    fn world_items(&self) -> &[DrawItem<BufferId>] {
        self.world_queries.set(self.world_queries.get() + 1);
        &self.world
    }
}
