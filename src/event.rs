//! Input events fed to producers.
//!
//! Producers (the local capture side and each remote client) receive input as
//! small deltas ([`InputKind`]), optionally timestamped ([`InputEvent`]), and fold
//! them into an [`ElementDataHolder`](crate::holder::ElementDataHolder).
//!
//! ## Value conventions
//! - **Stick axes:** normalized to `[-1.0, 1.0]`, Y positive = down.
//! - **Triggers:** normalized to `[0.0, 1.0]` (released .. fully pressed).
//! - **Hats (D-pad):** `-1` = neutral, `0..7` = 8-way directions (Up = 0, clockwise).
//! - **Mouse movement / wheel:** raw OS units, not normalized.

use crate::keycode::Keycode;

/// Gamepad analog channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

/// Input change (delta).
#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    /// A keyboard key or mouse button went down.
    KeyPressed { code: Keycode },

    /// A keyboard key or mouse button went up.
    KeyReleased { code: Keycode },

    /// A gamepad button went down on gamepad `pad`.
    ButtonPressed { pad: u8, code: Keycode },

    ButtonReleased { pad: u8, code: Keycode },

    /// A gamepad analog channel changed.
    AxisMoved { pad: u8, axis: PadAxis, value: f32 },

    /// The D-pad changed.
    ///
    /// `value`: `-1` = neutral, `0..7` = directions (Up = 0, clockwise).
    HatChanged { pad: u8, value: i16 },

    /// Relative mouse motion since the last event.
    MouseMoved { dx: i32, dy: i32 },

    /// Wheel ticks; positive scrolls up.
    WheelScrolled { delta: i16 },
}

/// Timestamped input event.
#[derive(Clone, Debug)]
pub struct InputEvent {
    /// Capture time (monotonic).
    pub at: std::time::Instant,
    pub kind: InputKind,
}

impl InputEvent {
    pub fn now(kind: InputKind) -> Self {
        Self {
            at: std::time::Instant::now(),
            kind,
        }
    }
}
