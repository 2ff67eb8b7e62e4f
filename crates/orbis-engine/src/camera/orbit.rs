use std::f32::consts::PI;

use glam::{Mat4, Vec3};

/// Pitch limit on either side of the horizon: 0.49π.
///
/// Keeps the eye off the poles, where `up` and the view direction become
/// parallel and the look-at basis flips.
pub const PITCH_LIMIT: f32 = PI * 0.49;

/// Orbit camera configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Initial yaw in radians.
    pub yaw: f32,
    /// Initial pitch in radians (clamped to ±[`PITCH_LIMIT`]).
    pub pitch: f32,
    /// Initial distance from `target`.
    pub radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,

    /// Fixed look-at point.
    pub target: Vec3,
    /// Fixed world-up vector.
    pub up: Vec3,

    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,

    /// Yaw change per surface-local unit of horizontal pan.
    pub yaw_per_unit: f32,
    /// Pitch change per surface-local unit of vertical pan.
    pub pitch_per_unit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: -0.25,
            radius: 3.0,
            min_radius: 0.5,
            max_radius: 20.0,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: PI / 3.0,
            near: 0.01,
            far: 100.0,
            yaw_per_unit: 0.005,
            pitch_per_unit: 0.003,
        }
    }
}

/// Camera parameterized by yaw/pitch/radius around a fixed target.
///
/// `eye` is a cache derived from `(yaw, pitch, radius, target)` and is
/// recomputed after every mutation; it is never written independently.
///
/// Convention (right-handed, +Y up):
/// `eye = target + radius * (cos(pitch)cos(yaw), sin(pitch), cos(pitch)sin(yaw))`.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    config: CameraConfig,

    yaw: f32,
    pitch: f32,
    radius: f32,

    eye: Vec3,
}

impl OrbitCamera {
    pub fn new(config: CameraConfig) -> Self {
        debug_assert!(config.min_radius > 0.0 && config.min_radius <= config.max_radius);
        debug_assert!(config.near < config.far);

        let mut camera = Self {
            yaw: config.yaw,
            pitch: config.pitch,
            radius: config.radius,
            eye: Vec3::ZERO,
            config,
        };
        camera.settle();
        camera
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn target(&self) -> Vec3 {
        self.config.target
    }

    /// Current eye position.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Restores yaw/pitch/radius to their configured initial values.
    pub fn reset(&mut self) {
        self.yaw = self.config.yaw;
        self.pitch = self.config.pitch;
        self.radius = self.config.radius;
        self.settle();
    }

    /// Rotates around the target by a pan delta in surface-local units.
    ///
    /// Non-finite deltas are ignored.
    pub fn apply_pan(&mut self, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.yaw -= dx * self.config.yaw_per_unit;
        self.pitch -= dy * self.config.pitch_per_unit;
        self.settle();
    }

    /// Scales the orbit radius by a magnification ratio.
    ///
    /// `factor > 1` is a zoom-in gesture and shrinks the radius:
    /// `radius *= 1 + (1 - factor)`, then clamps to the configured range.
    /// Non-finite factors are ignored.
    pub fn apply_zoom(&mut self, factor: f32) {
        if !factor.is_finite() {
            return;
        }
        self.radius *= 1.0 + (1.0 - factor);
        self.settle();
    }

    /// Right-handed look-at from the eye toward the target.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.config.target, self.config.up)
    }

    /// Right-handed perspective with a `[0, 1]` depth range.
    ///
    /// `aspect` is floored to a small positive value. `near >= far` is a
    /// caller contract violation and yields a degenerate (finite) matrix.
    pub fn projection_matrix(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let aspect = if aspect.is_finite() { aspect.max(1.0e-4) } else { 1.0 };
        Mat4::perspective_rh(fov_y, aspect, near, far)
    }

    /// `projection × view × model`, with an identity model matrix.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let CameraConfig { fov_y, near, far, .. } = self.config;
        Self::projection_matrix(fov_y, aspect, near, far) * self.view_matrix() * Mat4::IDENTITY
    }

    /// Re-clamps pitch and radius, then refreshes the eye cache.
    fn settle(&mut self) {
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.radius = self
            .radius
            .clamp(self.config.min_radius, self.config.max_radius);
        self.eye = orbit_eye(self.config.target, self.yaw, self.pitch, self.radius);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

fn orbit_eye(target: Vec3, yaw: f32, pitch: f32, radius: f32) -> Vec3 {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    target + radius * Vec3::new(cp * cy, sp, cp * sy)
}
