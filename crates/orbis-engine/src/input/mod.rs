//! Input subsystem.
//!
//! Public API is platform-agnostic; `platform::winit` translates window
//! system events into `InputEvent`s. `InputState` recognizes camera gestures
//! (pointer drag → pan, wheel and pinch → zoom) and records key presses.

mod frame;
pub mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::{GestureConfig, InputState};
pub use types::{ButtonState, InputEvent, Key, KeyState, MouseButton, MouseWheelDelta};
