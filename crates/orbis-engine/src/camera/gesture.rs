use super::OrbitCamera;

/// Continuous input gesture already reduced to surface-local units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Gesture {
    /// Pointer translation since the previous pan event.
    Pan { dx: f32, dy: f32 },

    /// Magnification ratio reported by the input layer (`> 1` zooms in).
    Zoom { factor: f32 },
}

/// Maps gestures onto orbit-camera mutations.
///
/// Sensitivities live in the camera config, so the same pixel delta always
/// produces the same angular change regardless of surface size. Out-of-range
/// results are absorbed by the camera's clamps; nothing is reported back.
#[derive(Debug, Default, Copy, Clone)]
pub struct OrbitGestures;

impl OrbitGestures {
    pub fn apply(camera: &mut OrbitCamera, gesture: Gesture) {
        match gesture {
            Gesture::Pan { dx, dy } => camera.apply_pan(dx, dy),
            Gesture::Zoom { factor } => camera.apply_zoom(factor),
        }

        log::trace!(
            "{gesture:?} -> yaw {:.3} pitch {:.3} radius {:.3}",
            camera.yaw(),
            camera.pitch(),
            camera.radius()
        );
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::camera::{CameraConfig, PITCH_LIMIT};

    #[test]
    fn pan_routes_to_yaw_and_pitch() {
        let mut cam = OrbitCamera::new(CameraConfig {
            pitch: 0.0,
            ..CameraConfig::default()
        });
        OrbitGestures::apply(&mut cam, Gesture::Pan { dx: 20.0, dy: -10.0 });
        assert_relative_eq!(cam.yaw(), -0.1, epsilon = 1e-6);
        assert_relative_eq!(cam.pitch(), 0.03, epsilon = 1e-6);
    }

    #[test]
    fn same_delta_same_rotation() {
        let mut a = OrbitCamera::default();
        let mut b = OrbitCamera::default();
        OrbitGestures::apply(&mut a, Gesture::Pan { dx: 12.0, dy: 3.0 });
        OrbitGestures::apply(&mut b, Gesture::Pan { dx: 12.0, dy: 3.0 });
        assert_eq!(a.yaw(), b.yaw());
        assert_eq!(a.pitch(), b.pitch());
    }

    #[test]
    fn zoom_routes_to_radius() {
        let mut cam = OrbitCamera::default();
        OrbitGestures::apply(&mut cam, Gesture::Zoom { factor: 1.5 });
        assert_relative_eq!(cam.radius(), 1.5, epsilon = 1e-5);
    }

    #[test]
    fn out_of_range_results_are_absorbed() {
        let mut cam = OrbitCamera::default();
        OrbitGestures::apply(&mut cam, Gesture::Pan { dx: 0.0, dy: -1.0e9 });
        OrbitGestures::apply(&mut cam, Gesture::Zoom { factor: -1.0e9 });
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        assert_eq!(cam.radius(), 20.0);
    }
}
