//! Input state tracking

use std::collections::HashSet;
use tracing::trace;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks which keys are currently held
///
/// Key-event delivery belongs to the host window; the stage only queries
/// [`InputState::is_pressed`].
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Currently pressed keys
    pub keys_pressed: HashSet<KeyCode>,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a keyboard event from the window
    pub fn handle_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.set_key(key_code, event.state);
        }
    }

    /// Record a key transition
    pub fn set_key(&mut self, key_code: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_pressed.insert(key_code);
                trace!("Key pressed: {:?}", key_code);
            }
            ElementState::Released => {
                self.keys_pressed.remove(&key_code);
                trace!("Key released: {:?}", key_code);
            }
        }
    }

    /// Mark a key as held
    pub fn press(&mut self, key_code: KeyCode) {
        self.set_key(key_code, ElementState::Pressed);
    }

    /// Mark a key as released
    pub fn release(&mut self, key_code: KeyCode) {
        self.set_key(key_code, ElementState::Released);
    }

    /// Check if a key is currently pressed
    pub fn is_pressed(&self, key_code: KeyCode) -> bool {
        self.keys_pressed.contains(&key_code)
    }

    /// Release every key, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
    }
}
