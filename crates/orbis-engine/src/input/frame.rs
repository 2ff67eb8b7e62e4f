use crate::camera::Gesture;

use super::types::Key;

/// Input collected between two frames.
///
/// `InputState` turns raw events into entries here; the runtime drains them
/// at the start of the next redraw.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Camera gestures in arrival order.
    pub gestures: Vec<Gesture>,

    /// Keys that went down this frame, without auto-repeats.
    pub keys_pressed: Vec<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.gestures.clear();
        self.keys_pressed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty() && self.keys_pressed.is_empty()
    }
}
