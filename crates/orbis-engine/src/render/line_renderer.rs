use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::backend::{Acquire, GpuApi, LineBackend};
use super::item::{DrawItem, LineVertex};
use super::mode::Layer;
use super::CompositorError;
use crate::coords::ViewportSize;
use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::paint::Color;

/// wgpu resource types for content sources.
pub struct Wgpu;

impl GpuApi for Wgpu {
    type Device = wgpu::Device;
    type Buffer = wgpu::Buffer;
}

/// Uploads `vertices` into a static vertex buffer.
///
/// Returns `None` for empty input so callers never hold zero-sized buffers.
pub fn create_line_item(
    device: &wgpu::Device,
    label: &str,
    vertices: &[LineVertex],
) -> Option<DrawItem<wgpu::Buffer>> {
    if vertices.is_empty() {
        return None;
    }

    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    Some(DrawItem::new(buffer, vertices.len() as u32))
}

// ── uniform ───────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TransformUniform {
    mvp: [[f32; 4]; 4],
}

impl From<Mat4> for TransformUniform {
    fn from(m: Mat4) -> Self {
        Self { mvp: m.to_cols_array_2d() }
    }
}

const TRANSFORM_SIZE: u64 = std::mem::size_of::<TransformUniform>() as u64;

/// Byte distance between the per-layer uniform slots.
fn slot_stride(min_offset_alignment: u32) -> u64 {
    wgpu::util::align_to(TRANSFORM_SIZE, u64::from(min_offset_alignment.max(1)))
}

fn slot_index(layer: Layer) -> u64 {
    match layer {
        Layer::World => 0,
        Layer::Hud => 1,
    }
}

// ── vertex layout ─────────────────────────────────────────────────────────

impl LineVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

struct LinePipelines {
    format: wgpu::TextureFormat,
    world: wgpu::RenderPipeline,
    hud: wgpu::RenderPipeline,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    stride: u64,
}

impl LinePipelines {
    fn pipeline(&self, layer: Layer) -> &wgpu::RenderPipeline {
        match layer {
            Layer::World => &self.world,
            Layer::Hud => &self.hud,
        }
    }

    fn slot_offset(&self, layer: Layer) -> u64 {
        slot_index(layer) * self.stride
    }
}

/// Line-list pipelines for both layers plus their shared transform uniform.
///
/// The uniform buffer holds one aligned slot per layer, selected with a
/// dynamic offset. Queue writes are staged until submit, so each layer needs
/// its own slot within a frame.
pub struct LineRenderer {
    clear_color: wgpu::Color,
    pipelines: Option<LinePipelines>,
}

impl LineRenderer {
    pub fn new(clear_color: Color) -> Self {
        Self {
            clear_color: clear_color.to_wgpu(),
            pipelines: None,
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.pipelines.is_some()
    }

    fn prepare(&mut self, gpu: &Gpu<'_>) -> Result<(), CompositorError> {
        let format = gpu.surface_format();
        if self.pipelines.as_ref().is_some_and(|p| p.format == format) {
            return Ok(());
        }

        check_capabilities(gpu)?;

        let device = gpu.device();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("orbis line shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/line.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("orbis line bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(TRANSFORM_SIZE),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("orbis line pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let stride = slot_stride(device.limits().min_uniform_buffer_offset_alignment);
        let uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orbis layer transforms"),
            size: stride * 2,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orbis line bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform,
                    offset: 0,
                    size: wgpu::BufferSize::new(TRANSFORM_SIZE),
                }),
            }],
        });

        let build = |layer| {
            line_pipeline(device, &pipeline_layout, &shader, format, gpu.depth_format(), layer)
        };

        self.pipelines = Some(LinePipelines {
            format,
            world: build(Layer::World),
            hud: build(Layer::Hud),
            uniform,
            bind_group,
            stride,
        });

        log::debug!("line pipelines built for {format:?}, uniform slot stride {stride}");
        Ok(())
    }
}

fn check_capabilities(gpu: &Gpu<'_>) -> Result<(), CompositorError> {
    let renderable = |format| {
        gpu.adapter()
            .get_texture_format_features(format)
            .allowed_usages
            .contains(wgpu::TextureUsages::RENDER_ATTACHMENT)
    };

    let format = gpu.surface_format();
    if !renderable(format) {
        return Err(CompositorError::MissingCapability(format!(
            "surface format {format:?} is not renderable"
        )));
    }

    let depth = gpu.depth_format();
    if !depth.is_depth_stencil_format() || !renderable(depth) {
        return Err(CompositorError::MissingCapability(format!(
            "depth attachment {depth:?} is unavailable"
        )));
    }

    Ok(())
}

/// World lines depth-test and write; HUD lines always pass and never write.
fn depth_state(format: wgpu::TextureFormat, layer: Layer) -> wgpu::DepthStencilState {
    let (depth_write_enabled, depth_compare) = match layer {
        Layer::World => (true, wgpu::CompareFunction::LessEqual),
        Layer::Hud => (false, wgpu::CompareFunction::Always),
    };

    wgpu::DepthStencilState {
        format,
        depth_write_enabled,
        depth_compare,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

fn line_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
    layer: Layer,
) -> wgpu::RenderPipeline {
    let label = match layer {
        Layer::World => "orbis world line pipeline",
        Layer::Hud => "orbis hud line pipeline",
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[LineVertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::LineList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(depth_state(depth_format, layer)),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

// ── backend ───────────────────────────────────────────────────────────────

/// One frame in flight: the acquired surface frame plus its open render pass.
pub struct LineFrame {
    pass: wgpu::RenderPass<'static>,
    target: GpuFrame,
}

/// [`LineBackend`] over a window's GPU context and its line renderer.
pub struct WgpuLineBackend<'a, 'w> {
    gpu: &'a mut Gpu<'w>,
    renderer: &'a mut LineRenderer,
    window: &'w Window,
}

impl<'a, 'w> WgpuLineBackend<'a, 'w> {
    pub fn new(gpu: &'a mut Gpu<'w>, renderer: &'a mut LineRenderer, window: &'w Window) -> Self {
        Self {
            gpu,
            renderer,
            window,
        }
    }
}

impl LineBackend for WgpuLineBackend<'_, '_> {
    type Api = Wgpu;
    type Frame = LineFrame;

    fn device(&self) -> &wgpu::Device {
        self.gpu.device()
    }

    fn surface_size(&self) -> ViewportSize {
        self.gpu.size().into()
    }

    fn prepare(&mut self) -> Result<(), CompositorError> {
        self.renderer.prepare(self.gpu)
    }

    fn create_line_buffer(
        &mut self,
        label: &str,
        vertices: &[LineVertex],
    ) -> Option<DrawItem<wgpu::Buffer>> {
        create_line_item(self.gpu.device(), label, vertices)
    }

    fn acquire_frame(&mut self) -> Acquire<LineFrame> {
        if ViewportSize::from(self.gpu.size()).is_empty() || !self.renderer.is_prepared() {
            return Acquire::Skip;
        }

        let mut target = match self.gpu.begin_frame() {
            Ok(target) => target,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => Acquire::Fatal,
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        Acquire::Skip
                    }
                };
            }
        };

        let pass = target
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("orbis line pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.renderer.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.gpu.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            })
            .forget_lifetime();

        Acquire::Frame(LineFrame { pass, target })
    }

    fn bind_layer(&mut self, frame: &mut LineFrame, layer: Layer, transform: &Mat4) {
        let Some(p) = self.renderer.pipelines.as_ref() else { return };

        let offset = p.slot_offset(layer);
        self.gpu.queue().write_buffer(
            &p.uniform,
            offset,
            bytemuck::bytes_of(&TransformUniform::from(*transform)),
        );

        frame.pass.set_pipeline(p.pipeline(layer));
        frame.pass.set_bind_group(0, &p.bind_group, &[offset as u32]);
    }

    fn draw_lines(&mut self, frame: &mut LineFrame, buffer: &wgpu::Buffer, vertex_count: u32) {
        frame.pass.set_vertex_buffer(0, buffer.slice(..));
        frame.pass.draw(0..vertex_count, 0..1);
    }

    fn present(&mut self, frame: LineFrame) {
        let LineFrame { pass, target } = frame;
        // The encoder stays locked until the pass ends.
        drop(pass);
        self.window.pre_present_notify();
        self.gpu.submit(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_respect_offset_alignment() {
        assert_eq!(slot_stride(256), 256);
        assert_eq!(slot_stride(64), 64);
        assert_eq!(slot_stride(32), 64);
        assert_eq!(slot_stride(0), TRANSFORM_SIZE);
    }

    #[test]
    fn layers_use_distinct_slots() {
        assert_ne!(slot_index(Layer::World), slot_index(Layer::Hud));
    }

    #[test]
    fn transform_uniform_is_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let u = TransformUniform::from(m);
        assert_eq!(u.mvp[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(std::mem::size_of::<TransformUniform>(), 64);
    }

    #[test]
    fn vertex_layout_matches_line_vertex() {
        let layout = LineVertex::layout();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 16);
    }

    #[test]
    fn hud_depth_never_rejects_or_writes() {
        let hud = depth_state(wgpu::TextureFormat::Depth32Float, Layer::Hud);
        assert!(!hud.depth_write_enabled);
        assert_eq!(hud.depth_compare, wgpu::CompareFunction::Always);

        let world = depth_state(wgpu::TextureFormat::Depth32Float, Layer::World);
        assert!(world.depth_write_enabled);
        assert_eq!(world.depth_compare, wgpu::CompareFunction::LessEqual);
    }
}
