use glam::Vec3;

use orbis_engine::coords::ViewportSize;
use orbis_engine::paint::Color;
use orbis_engine::render::{
    clip_circle_line_list, create_line_item, ring_line_list, ContentSource, DrawItem, LineVertex,
    Wgpu,
};

const HUD_CIRCLE_RADIUS: f32 = 0.7;
const HUD_CIRCLE_SEGMENTS: u32 = 160;
const RING_SEGMENTS: u32 = 200;

/// Named CPU-side geometry for one layer.
pub struct Batch {
    pub label: &'static str,
    pub vertices: Vec<LineVertex>,
}

/// Everything the demo draws, before upload.
pub struct DemoGeometry {
    pub hud: Vec<Batch>,
    pub world: Vec<Batch>,
}

impl DemoGeometry {
    /// A clip-space circle on the HUD and two orthogonal rings around the origin.
    pub fn build() -> Self {
        Self {
            hud: vec![Batch {
                label: "demo hud circle",
                vertices: clip_circle_line_list(
                    HUD_CIRCLE_RADIUS,
                    HUD_CIRCLE_SEGMENTS,
                    Color::rgb(0.95, 0.3, 0.3),
                ),
            }],
            world: vec![
                Batch {
                    label: "demo ring xz",
                    vertices: ring_line_list(1.0, RING_SEGMENTS, Vec3::Y, Color::rgb(0.2, 0.8, 1.0)),
                },
                Batch {
                    label: "demo ring yz",
                    vertices: ring_line_list(0.8, RING_SEGMENTS, Vec3::X, Color::rgb(0.9, 0.9, 0.2)),
                },
            ],
        }
    }
}

/// Static demo content.
///
/// Geometry does not depend on the viewport: HUD positions are clip space and
/// world positions are scene units. Buffers are still rebuilt on every resize
/// so a provider with size-dependent content can follow the same path.
#[derive(Default)]
pub struct DemoScene {
    hud: Vec<DrawItem<wgpu::Buffer>>,
    world: Vec<DrawItem<wgpu::Buffer>>,
}

impl DemoScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentSource<Wgpu> for DemoScene {
    fn build_resources(&mut self, device: &wgpu::Device, viewport: ViewportSize) {
        let DemoGeometry { hud, world } = DemoGeometry::build();
        let upload = |batches: Vec<Batch>| -> Vec<DrawItem<wgpu::Buffer>> {
            batches
                .iter()
                .filter_map(|b| create_line_item(device, b.label, &b.vertices))
                .collect()
        };

        self.hud = upload(hud);
        self.world = upload(world);

        log::info!(
            "demo scene built for {}x{}: {} hud / {} world items",
            viewport.width,
            viewport.height,
            self.hud.len(),
            self.world.len()
        );
    }

    fn update(&mut self, _dt: f32) {}

    fn hud_items(&self) -> &[DrawItem<wgpu::Buffer>] {
        &self.hud
    }

    fn world_items(&self) -> &[DrawItem<wgpu::Buffer>] {
        &self.world
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn radius_xyz(v: &LineVertex) -> f32 {
        Vec3::new(v.position[0], v.position[1], v.position[2]).length()
    }

    #[test]
    fn hud_circle_is_closed_clip_geometry() {
        let geo = DemoGeometry::build();
        assert_eq!(geo.hud.len(), 1);

        let circle = &geo.hud[0].vertices;
        assert_eq!(circle.len(), 2 * HUD_CIRCLE_SEGMENTS as usize);
        for v in circle {
            assert_eq!(v.position[2], 0.0);
            assert_relative_eq!(radius_xyz(v), HUD_CIRCLE_RADIUS, epsilon = 1e-5);
        }
        assert_eq!(circle.last().map(|v| v.position), circle.first().map(|v| v.position));
    }

    #[test]
    fn rings_lie_in_orthogonal_planes() {
        let geo = DemoGeometry::build();
        let [xz, yz] = [&geo.world[0].vertices, &geo.world[1].vertices];

        assert_eq!(xz.len(), 400);
        assert_eq!(yz.len(), 400);
        for v in xz {
            assert_relative_eq!(v.position[1], 0.0, epsilon = 1e-6);
            assert_relative_eq!(radius_xyz(v), 1.0, epsilon = 1e-5);
        }
        for v in yz {
            assert_relative_eq!(v.position[0], 0.0, epsilon = 1e-6);
            assert_relative_eq!(radius_xyz(v), 0.8, epsilon = 1e-5);
        }
    }

    #[test]
    fn colors_are_opaque() {
        let geo = DemoGeometry::build();
        for batch in geo.hud.iter().chain(&geo.world) {
            assert!(batch.vertices.iter().all(|v| v.color[3] == 1.0), "{}", batch.label);
        }
    }
}
