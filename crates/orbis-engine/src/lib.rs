//! Orbis engine crate.
//!
//! Draws line-list content in two coexisting spaces: a fixed clip-space HUD
//! overlay and a 3D world seen through an orbiting perspective camera.
//! The frame compositor owns per-frame timing, the camera and the layer
//! mode; content comes from an external `ContentSource`.

pub mod camera;
pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;
