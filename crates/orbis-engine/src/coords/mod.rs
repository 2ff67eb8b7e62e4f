//! Coordinate types shared between the runtime, the compositor and content
//! providers.
//!
//! Sizes are physical pixels. Gesture deltas are logical pixels (see `input`).

mod viewport;

pub use viewport::ViewportSize;
