//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the window, wires them to the GPU layer,
//! and drives the frame compositor once per redraw.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
