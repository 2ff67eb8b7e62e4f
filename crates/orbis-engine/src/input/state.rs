use std::collections::HashSet;

use crate::camera::Gesture;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, Key, KeyState, MouseButton, MouseWheelDelta};

/// Gesture recognition settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Button that turns pointer drags into pan gestures.
    pub pan_button: MouseButton,

    /// Zoom step per wheel line; the emitted factor is `1 + lines * step`.
    pub wheel_line_step: f32,

    /// Zoom step per logical pixel of high-precision scrolling.
    pub wheel_pixel_step: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pan_button: MouseButton::Left,
            wheel_line_step: 0.1,
            wheel_pixel_step: 0.002,
        }
    }
}

/// Current input state for a single window.
///
/// Tracks held keys/buttons and the pointer, and writes recognized gestures
/// and key presses into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub config: GestureConfig,

    pub focused: bool,

    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Applies one event and records what it produced into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // A release delivered while unfocused never reaches us.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::PointerMoved { x, y } => {
                let prev = self.pointer_pos.replace((x, y));
                if !self.is_panning() {
                    return;
                }
                if let Some((px, py)) = prev {
                    let (dx, dy) = (x - px, y - py);
                    if dx != 0.0 || dy != 0.0 {
                        frame.gestures.push(Gesture::Pan { dx, dy });
                    }
                }
            }

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    self.buttons_down.insert(button);
                }
                ButtonState::Released => {
                    self.buttons_down.remove(&button);
                }
            },

            InputEvent::MouseWheel(delta) => {
                let step = match delta {
                    MouseWheelDelta::Line { y, .. } => y * self.config.wheel_line_step,
                    MouseWheelDelta::Pixel { y, .. } => y * self.config.wheel_pixel_step,
                };
                push_zoom(frame, step);
            }

            InputEvent::Pinch { delta } => push_zoom(frame, delta),

            InputEvent::Key { key, state, repeat } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(key) && !repeat {
                        frame.keys_pressed.push(key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    pub fn is_panning(&self) -> bool {
        self.button_down(self.config.pan_button)
    }
}

fn push_zoom(frame: &mut InputFrame, step: f32) {
    if step != 0.0 && step.is_finite() {
        frame.gestures.push(Gesture::Zoom { factor: 1.0 + step });
    }
}
