use super::item::LineVertex;
use crate::paint::Color;

/// Ground grid + axis gizmo drawn under world content.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Distance between adjacent grid lines.
    pub spacing: f32,
    /// Lines on each side of the origin, per direction.
    pub half_lines: u32,
    /// Half-length of the X and Z axis segments; the Y segment is a tenth of it.
    pub axis_length: f32,
    /// Every n-th line (counting from the origin) uses `major_color`.
    pub major_every: u32,

    pub minor_color: Color,
    pub major_color: Color,
    pub x_axis_color: Color,
    pub y_axis_color: Color,
    pub z_axis_color: Color,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            half_lines: 10,
            axis_length: 50.0,
            major_every: 5,
            minor_color: Color::rgb(0.35, 0.35, 0.35),
            major_color: Color::rgb(0.55, 0.55, 0.55),
            x_axis_color: Color::rgb(1.0, 0.2, 0.2),
            y_axis_color: Color::rgb(0.2, 1.0, 0.2),
            z_axis_color: Color::rgb(0.2, 0.6, 1.0),
        }
    }
}

impl GridConfig {
    /// Vertex count of [`GridConfig::line_list`]: `4 * (2 * half_lines + 1) + 6`.
    pub fn vertex_count(&self) -> usize {
        4 * (2 * self.half_lines as usize + 1) + 6
    }

    /// Builds the grid on the y = 0 plane as a line list.
    ///
    /// Order: lines parallel to X (varying z), lines parallel to Z (varying x),
    /// then the X, Z and Y axis segments.
    pub fn line_list(&self) -> Vec<LineVertex> {
        let n = self.half_lines as i64;
        let extent = n as f32 * self.spacing;
        let mut v = Vec::with_capacity(self.vertex_count());

        for i in -n..=n {
            let z = i as f32 * self.spacing;
            let c = self.line_color(i);
            v.push(LineVertex::new(-extent, 0.0, z, c));
            v.push(LineVertex::new(extent, 0.0, z, c));
        }

        for i in -n..=n {
            let x = i as f32 * self.spacing;
            let c = self.line_color(i);
            v.push(LineVertex::new(x, 0.0, -extent, c));
            v.push(LineVertex::new(x, 0.0, extent, c));
        }

        let a = self.axis_length;
        v.push(LineVertex::new(-a, 0.0, 0.0, self.x_axis_color));
        v.push(LineVertex::new(a, 0.0, 0.0, self.x_axis_color));
        v.push(LineVertex::new(0.0, 0.0, -a, self.z_axis_color));
        v.push(LineVertex::new(0.0, 0.0, a, self.z_axis_color));
        v.push(LineVertex::new(0.0, -a * 0.1, 0.0, self.y_axis_color));
        v.push(LineVertex::new(0.0, a * 0.1, 0.0, self.y_axis_color));

        v
    }

    fn line_color(&self, i: i64) -> Color {
        if self.major_every > 0 && i % i64::from(self.major_every) == 0 {
            self.major_color
        } else {
            self.minor_color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_vertex_count() {
        let grid = GridConfig::default();
        assert_eq!(grid.vertex_count(), 90);
        assert_eq!(grid.line_list().len(), 90);
    }

    #[test]
    fn grid_lies_on_ground_plane() {
        let verts = GridConfig::default().line_list();
        // Everything but the final Y-axis segment has y = 0.
        assert!(verts[..verts.len() - 2].iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn origin_and_every_fifth_line_are_major() {
        let grid = GridConfig::default();
        let verts = grid.line_list();
        let major = grid.major_color.to_array();
        let minor = grid.minor_color.to_array();
        // Lines parallel to X start at i = -10: index k corresponds to i = k - 10.
        let color_of = |i: i64| verts[((i + 10) * 2) as usize].color;
        assert_eq!(color_of(-10), major);
        assert_eq!(color_of(-5), major);
        assert_eq!(color_of(0), major);
        assert_eq!(color_of(3), minor);
        assert_eq!(color_of(-7), minor);
    }

    #[test]
    fn extent_follows_spacing() {
        let grid = GridConfig {
            spacing: 0.5,
            half_lines: 4,
            ..GridConfig::default()
        };
        let verts = grid.line_list();
        assert_eq!(verts[0].position, [-2.0, 0.0, -2.0, 1.0]);
        assert_eq!(verts[1].position, [2.0, 0.0, -2.0, 1.0]);
    }

    #[test]
    fn axis_segments_close_the_list() {
        let verts = GridConfig::default().line_list();
        let tail = &verts[verts.len() - 6..];
        assert_eq!(tail[0].position, [-50.0, 0.0, 0.0, 1.0]);
        assert_eq!(tail[3].position, [0.0, 0.0, 50.0, 1.0]);
        assert_eq!(tail[5].position, [0.0, 5.0, 0.0, 1.0]);
    }
}
