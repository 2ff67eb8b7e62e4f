//! CPU-side builders for line-list geometry.
//!
//! Content providers use these to turn polylines and circles into the vertex
//! pairs a line-list draw expects.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::item::LineVertex;
use crate::paint::Color;

/// How 2D polyline points are placed in space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PolylineSpace {
    /// Clip-space `(x, y)` with `z = 0`; for HUD content.
    ClipXy,
    /// World XY plane at depth `z`, points scaled by `scale`.
    WorldXy { scale: f32, z: f32 },
    /// World XZ plane at height `y`; point `y` maps to world `z`.
    WorldXz { scale: f32, y: f32 },
    /// World YZ plane at `x`; point `(x, y)` maps to world `(y, z)`.
    WorldYz { scale: f32, x: f32 },
}

impl PolylineSpace {
    pub fn place(self, p: Vec2) -> Vec3 {
        match self {
            PolylineSpace::ClipXy => Vec3::new(p.x, p.y, 0.0),
            PolylineSpace::WorldXy { scale, z } => Vec3::new(p.x * scale, p.y * scale, z),
            PolylineSpace::WorldXz { scale, y } => Vec3::new(p.x * scale, y, p.y * scale),
            PolylineSpace::WorldYz { scale, x } => Vec3::new(x, p.x * scale, p.y * scale),
        }
    }
}

/// Expands a polyline into independent segments.
///
/// Fewer than two points produce no geometry. `closed` adds a segment from the
/// last point back to the first.
pub fn polyline_to_line_list(
    points: &[Vec2],
    space: PolylineSpace,
    color: Color,
    closed: bool,
) -> Vec<LineVertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let placed: Vec<Vec3> = points.iter().map(|p| space.place(*p)).collect();
    let segments = placed.len() - 1 + usize::from(closed);

    let mut verts = Vec::with_capacity(segments * 2);
    for pair in placed.windows(2) {
        push_segment(&mut verts, pair[0], pair[1], color);
    }
    if closed {
        push_segment(&mut verts, placed[placed.len() - 1], placed[0], color);
    }
    verts
}

/// `max(3, segments)` evenly spaced points on a circle around the origin.
pub fn circle_points(radius: f32, segments: u32) -> Vec<Vec2> {
    let n = segments.max(3);
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32 * TAU;
            Vec2::new(radius * t.cos(), radius * t.sin())
        })
        .collect()
}

/// Closed clip-space circle as a line list of `2 * max(3, segments)` vertices.
pub fn clip_circle_line_list(radius: f32, segments: u32, color: Color) -> Vec<LineVertex> {
    polyline_to_line_list(
        &circle_points(radius, segments),
        PolylineSpace::ClipXy,
        color,
        true,
    )
}

/// Closed circle centred at the origin in the plane orthogonal to `axis`.
///
/// Produces `2 * max(3, segments)` vertices. A zero axis falls back to +Y.
pub fn ring_line_list(radius: f32, segments: u32, axis: Vec3, color: Color) -> Vec<LineVertex> {
    let up = axis.try_normalize().unwrap_or(Vec3::Y);
    let helper = if up.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let u = up.cross(helper).normalize();
    let v = up.cross(u);

    let n = segments.max(3);
    let ring: Vec<Vec3> = (0..n)
        .map(|i| {
            let t = i as f32 / n as f32 * TAU;
            radius * (t.cos() * u + t.sin() * v)
        })
        .collect();

    let mut verts = Vec::with_capacity(ring.len() * 2);
    for i in 0..ring.len() {
        push_segment(&mut verts, ring[i], ring[(i + 1) % ring.len()], color);
    }
    verts
}

fn push_segment(out: &mut Vec<LineVertex>, a: Vec3, b: Vec3, color: Color) {
    out.push(LineVertex::new(a.x, a.y, a.z, color));
    out.push(LineVertex::new(b.x, b.y, b.z, color));
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn pos3(v: &LineVertex) -> Vec3 {
        Vec3::new(v.position[0], v.position[1], v.position[2])
    }

    // ── polylines ─────────────────────────────────────────────────────────

    #[test]
    fn short_polylines_are_empty() {
        assert!(polyline_to_line_list(&[], PolylineSpace::ClipXy, Color::WHITE, true).is_empty());
        let one = [Vec2::new(0.5, 0.5)];
        assert!(polyline_to_line_list(&one, PolylineSpace::ClipXy, Color::WHITE, true).is_empty());
    }

    #[test]
    fn open_polyline_pairs_consecutive_points() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        let verts = polyline_to_line_list(&pts, PolylineSpace::ClipXy, Color::WHITE, false);
        assert_eq!(verts.len(), 4);
        assert_eq!(pos3(&verts[1]), pos3(&verts[2]));
    }

    #[test]
    fn closed_polyline_adds_return_segment() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        let verts = polyline_to_line_list(&pts, PolylineSpace::ClipXy, Color::WHITE, true);
        assert_eq!(verts.len(), 6);
        assert_eq!(pos3(&verts[4]), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(pos3(&verts[5]), Vec3::ZERO);
    }

    #[test]
    fn spaces_place_points() {
        let p = Vec2::new(1.0, 2.0);
        assert_eq!(PolylineSpace::ClipXy.place(p), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(
            PolylineSpace::WorldXy { scale: 2.0, z: -1.0 }.place(p),
            Vec3::new(2.0, 4.0, -1.0)
        );
        assert_eq!(
            PolylineSpace::WorldXz { scale: 2.0, y: 0.5 }.place(p),
            Vec3::new(2.0, 0.5, 4.0)
        );
        assert_eq!(
            PolylineSpace::WorldYz { scale: 2.0, x: 3.0 }.place(p),
            Vec3::new(3.0, 2.0, 4.0)
        );
    }

    // ── circles ───────────────────────────────────────────────────────────

    #[test]
    fn circle_has_two_vertices_per_segment() {
        assert_eq!(clip_circle_line_list(0.7, 80, Color::WHITE).len(), 160);
        assert_eq!(ring_line_list(1.0, 200, Vec3::Y, Color::WHITE).len(), 400);
    }

    #[test]
    fn circle_segments_have_a_floor_of_three() {
        assert_eq!(circle_points(1.0, 0).len(), 3);
        assert_eq!(clip_circle_line_list(1.0, 1, Color::WHITE).len(), 6);
    }

    #[test]
    fn clip_circle_stays_on_z_zero() {
        let verts = clip_circle_line_list(0.7, 32, Color::WHITE);
        for v in &verts {
            assert_eq!(v.position[2], 0.0);
            assert_relative_eq!(pos3(v).length(), 0.7, epsilon = 1e-5);
        }
    }

    #[test]
    fn ring_lies_in_plane_orthogonal_to_axis() {
        let verts = ring_line_list(0.8, 64, Vec3::X, Color::WHITE);
        for v in &verts {
            let p = pos3(v);
            assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
            assert_relative_eq!(p.length(), 0.8, epsilon = 1e-5);
        }
    }

    #[test]
    fn ring_is_closed() {
        let verts = ring_line_list(1.0, 16, Vec3::Y, Color::WHITE);
        assert_eq!(pos3(&verts[verts.len() - 1]), pos3(&verts[0]));
    }

    #[test]
    fn zero_axis_falls_back_to_up() {
        let verts = ring_line_list(1.0, 8, Vec3::ZERO, Color::WHITE);
        assert!(verts.iter().all(|v| v.position[1].abs() < 1e-6));
    }
}
