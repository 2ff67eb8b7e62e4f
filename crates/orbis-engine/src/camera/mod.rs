//! Orbit camera and the gesture adapter that drives it.
//!
//! The camera owns yaw/pitch/radius and derives the eye, view and projection.
//! `OrbitGestures` is the only path by which input reaches it.

mod gesture;
mod orbit;

pub use gesture::{Gesture, OrbitGestures};
pub use orbit::{CameraConfig, OrbitCamera, PITCH_LIMIT};
