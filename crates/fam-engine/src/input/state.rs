use std::collections::BTreeMap;

use glam::Vec2;

use super::queue::{InputEvent, JoystickId, MouseButton};

/// Key codes. Values match the GLFW key table so a desktop front end can pass
/// codes straight through.
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const E: u32 = 69;
    pub const F: u32 = 70;
    pub const Q: u32 = 81;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
    pub const ESCAPE: u32 = 256;
    pub const ENTER: u32 = 257;
    pub const RIGHT: u32 = 262;
    pub const LEFT: u32 = 263;
    pub const DOWN: u32 = 264;
    pub const UP: u32 = 265;
}

const KEY_TABLE_SIZE: usize = 512;

/// Held-state view of the input stream: which keys are down, where the
/// cursor is, and the latest axis values of each joystick.
pub struct InputState {
    keys: Vec<bool>,
    mouse: Vec2,
    buttons: [bool; 3],
    joysticks: BTreeMap<JoystickId, Vec<f32>>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: vec![false; KEY_TABLE_SIZE],
            mouse: Vec2::ZERO,
            buttons: [false; 3],
            joysticks: BTreeMap::new(),
        }
    }

    /// Fold one event into the held state.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => self.set_key(key_code, true),
            InputEvent::KeyUp { key_code } => self.set_key(key_code, false),
            InputEvent::PointerMove { x, y } => self.mouse = Vec2::new(x, y),
            InputEvent::PointerDown { x, y, button } => {
                self.mouse = Vec2::new(x, y);
                self.buttons[button_index(button)] = true;
            }
            InputEvent::PointerUp { x, y, button } => {
                self.mouse = Vec2::new(x, y);
                self.buttons[button_index(button)] = false;
            }
            InputEvent::JoystickConnected { joystick } => {
                self.joysticks.entry(joystick).or_default();
            }
            InputEvent::JoystickDisconnected { joystick } => {
                self.joysticks.remove(&joystick);
            }
            InputEvent::JoystickAxis { joystick, axis, value } => {
                let axes = self.joysticks.entry(joystick).or_default();
                let index = axis as usize;
                if axes.len() <= index {
                    axes.resize(index + 1, 0.0);
                }
                axes[index] = value.clamp(-1.0, 1.0);
            }
            InputEvent::Custom { .. } => {}
        }
    }

    pub fn is_key_down(&self, key_code: u32) -> bool {
        self.keys.get(key_code as usize).copied().unwrap_or(false)
    }

    pub fn mouse(&self) -> Vec2 {
        self.mouse
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)]
    }

    pub fn is_joystick_present(&self, joystick: JoystickId) -> bool {
        self.joysticks.contains_key(&joystick)
    }

    /// Axis values of a joystick; empty if it sent none yet, `None` if absent.
    pub fn joystick_axes(&self, joystick: JoystickId) -> Option<&[f32]> {
        self.joysticks.get(&joystick).map(Vec::as_slice)
    }

    pub fn joysticks(&self) -> impl Iterator<Item = JoystickId> + '_ {
        self.joysticks.keys().copied()
    }

    /// Forget all held keys and buttons (e.g. on focus loss). Joysticks stay.
    pub fn release_all(&mut self) {
        self.keys.iter_mut().for_each(|k| *k = false);
        self.buttons = [false; 3];
    }

    fn set_key(&mut self, key_code: u32, down: bool) {
        match self.keys.get_mut(key_code as usize) {
            Some(slot) => *slot = down,
            None => log::warn!("ignoring out-of-range key code {}", key_code),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

fn button_index(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
    }
}
