//! Runtime state records.
//!
//! One [`ElementData`] variant per element kind. The overlay owns one record per
//! distinct keycode; producers own their own records and hand out read-only
//! references as *fragments* during a refresh cycle. [`ElementData::merge`] folds
//! a fragment into an owned record.
//!
//! # Merge policy
//! - `None` fragment: the record resets to idle. Producers drop records on
//!   release, so "no data" and "released" are the same thing.
//! - Fragment of a different variant: ignored.
//! - Stick and trigger fragments carry a channel mask; only flagged channels are
//!   copied, everything else in the target keeps its value. All other variants
//!   copy every field.

use crate::element::ElementKind;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

impl ButtonState {
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }
}

impl From<bool> for ButtonState {
    fn from(pressed: bool) -> Self {
        if pressed {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelDirection {
    #[default]
    None,
    Up,
    Down,
}

/// D-pad direction. The discriminant is the texture region index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DpadDirection {
    #[default]
    Center = 0,
    Left,
    Right,
    Up,
    Down,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl DpadDirection {
    /// Map a hat value (`-1` neutral, `0..7` Up = 0 clockwise) to a direction.
    pub fn from_hat(value: i16) -> Self {
        match value {
            0 => DpadDirection::Up,
            1 => DpadDirection::TopRight,
            2 => DpadDirection::Right,
            3 => DpadDirection::BottomRight,
            4 => DpadDirection::Down,
            5 => DpadDirection::BottomLeft,
            6 => DpadDirection::Left,
            7 => DpadDirection::TopLeft,
            _ => DpadDirection::Center,
        }
    }

    #[inline]
    pub fn region_index(self) -> u32 {
        self as u32
    }
}

bitflags! {
    /// Which parts of a [`StickData`] fragment carry fresh values.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct StickChannels: u8 {
        const LEFT_AXES = 0b0001;
        const RIGHT_AXES = 0b0010;
        const LEFT_BUTTON = 0b0100;
        const RIGHT_BUTTON = 0b1000;
    }
}

bitflags! {
    /// Which trigger values of a fragment carry fresh values.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TriggerChannels: u8 {
        const LEFT = 0b01;
        const RIGHT = 0b10;
    }
}

/// Both thumbsticks of one gamepad.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StickData {
    pub left_state: ButtonState,
    pub right_state: ButtonState,
    pub left_x: f32,
    pub left_y: f32,
    pub right_x: f32,
    pub right_y: f32,
    pub channels: StickChannels,
}

impl Default for StickData {
    fn default() -> Self {
        Self {
            left_state: ButtonState::Released,
            right_state: ButtonState::Released,
            left_x: 0.0,
            left_y: 0.0,
            right_x: 0.0,
            right_y: 0.0,
            channels: StickChannels::all(),
        }
    }
}

impl StickData {
    fn absorb(&mut self, other: &StickData) {
        let ch = other.channels;
        if ch.contains(StickChannels::LEFT_AXES) {
            self.left_x = other.left_x;
            self.left_y = other.left_y;
        }
        if ch.contains(StickChannels::RIGHT_AXES) {
            self.right_x = other.right_x;
            self.right_y = other.right_y;
        }
        if ch.contains(StickChannels::LEFT_BUTTON) {
            self.left_state = other.left_state;
        }
        if ch.contains(StickChannels::RIGHT_BUTTON) {
            self.right_state = other.right_state;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ElementData {
    /// Backing record for elements that never change (textures).
    Static,
    Button {
        state: ButtonState,
    },
    Wheel {
        /// Middle mouse button.
        state: ButtonState,
        direction: WheelDirection,
    },
    Trigger {
        left: f32,
        right: f32,
        channels: TriggerChannels,
    },
    AnalogStick(StickData),
    DPad {
        direction: DpadDirection,
        state: ButtonState,
    },
    MouseMovement {
        dx: i32,
        dy: i32,
    },
}

impl ElementData {
    /// The zero/released record backing an element of `kind`.
    pub fn idle(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Texture => ElementData::Static,
            ElementKind::Button | ElementKind::GamepadId => ElementData::Button {
                state: ButtonState::Released,
            },
            ElementKind::Wheel => ElementData::Wheel {
                state: ButtonState::Released,
                direction: WheelDirection::None,
            },
            ElementKind::Trigger => ElementData::Trigger {
                left: 0.0,
                right: 0.0,
                channels: TriggerChannels::all(),
            },
            ElementKind::AnalogStick => ElementData::AnalogStick(StickData::default()),
            ElementKind::DPad => ElementData::DPad {
                direction: DpadDirection::Center,
                state: ButtonState::Released,
            },
            ElementKind::MouseMovement => ElementData::MouseMovement { dx: 0, dy: 0 },
        }
    }

    /// Fold a freshly sampled fragment into this record.
    pub fn merge(&mut self, fragment: Option<&ElementData>) {
        let Some(other) = fragment else {
            self.reset();
            return;
        };

        match (self, other) {
            (ElementData::Static, ElementData::Static) => {}
            (ElementData::Button { state }, ElementData::Button { state: s }) => *state = *s,
            (
                ElementData::Wheel { state, direction },
                ElementData::Wheel {
                    state: s,
                    direction: d,
                },
            ) => {
                *state = *s;
                *direction = *d;
            }
            (
                ElementData::Trigger { left, right, .. },
                ElementData::Trigger {
                    left: l,
                    right: r,
                    channels,
                },
            ) => {
                if channels.contains(TriggerChannels::LEFT) {
                    *left = *l;
                }
                if channels.contains(TriggerChannels::RIGHT) {
                    *right = *r;
                }
            }
            (ElementData::AnalogStick(mine), ElementData::AnalogStick(theirs)) => {
                mine.absorb(theirs)
            }
            (
                ElementData::DPad { direction, state },
                ElementData::DPad {
                    direction: d,
                    state: s,
                },
            ) => {
                *direction = *d;
                *state = *s;
            }
            (ElementData::MouseMovement { dx, dy }, ElementData::MouseMovement { dx: x, dy: y }) => {
                *dx = *x;
                *dy = *y;
            }
            (mine, theirs) => {
                log::trace!("Ignoring {:?} fragment for {:?} record", theirs, mine);
            }
        }
    }

    /// Return to the idle state without changing the variant.
    pub fn reset(&mut self) {
        match self {
            ElementData::Static => {}
            ElementData::Button { state } => *state = ButtonState::Released,
            ElementData::Wheel { state, direction } => {
                *state = ButtonState::Released;
                *direction = WheelDirection::None;
            }
            ElementData::Trigger { left, right, .. } => {
                *left = 0.0;
                *right = 0.0;
            }
            ElementData::AnalogStick(stick) => {
                *stick = StickData {
                    channels: stick.channels,
                    ..StickData::default()
                }
            }
            ElementData::DPad { direction, state } => {
                *direction = DpadDirection::Center;
                *state = ButtonState::Released;
            }
            ElementData::MouseMovement { dx, dy } => {
                *dx = 0;
                *dy = 0;
            }
        }
    }

    /// Pressed state of button-like records; `false` for everything else.
    pub fn is_pressed(&self) -> bool {
        match self {
            ElementData::Button { state }
            | ElementData::Wheel { state, .. }
            | ElementData::DPad { state, .. } => state.is_pressed(),
            _ => false,
        }
    }
}
