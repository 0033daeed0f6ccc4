/// Identifies a connected joystick/gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoystickId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Input event types the engine understands.
/// Generic: no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click began at world coordinates (x, y).
    PointerDown { x: f32, y: f32, button: MouseButton },
    /// A click ended at world coordinates (x, y).
    PointerUp { x: f32, y: f32, button: MouseButton },
    /// The cursor moved to world coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed. Codes follow [`keys`](crate::input::keys).
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    JoystickConnected { joystick: JoystickId },
    JoystickDisconnected { joystick: JoystickId },
    /// An analog axis changed, `value` in [-1, 1].
    JoystickAxis { joystick: JoystickId, axis: u8, value: f32 },
    /// A custom event from the UI layer (buttons, toggles).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// The platform layer writes events into the queue; the game reads them each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
