//! Producer-side state store.
//!
//! Each producer (the local capture side, every remote client) owns one
//! [`ElementDataHolder`] behind its own lock. Input events are folded in with
//! [`ElementDataHolder::apply`]; the overlay reads records back through the
//! [`DataSource`] trait while holding that lock.
//!
//! Released inputs are removed rather than stored as released, so a lookup
//! miss always means "idle".

use crate::data::{
    ButtonState, DpadDirection, ElementData, StickData, TriggerChannels, WheelDirection,
};
use crate::event::{InputKind, PadAxis};
use crate::keycode::{self, Keycode};
use std::collections::HashMap;

/// Anything that can hand out state fragments by keycode.
pub trait DataSource {
    fn get_by_code(&self, code: Keycode) -> Option<&ElementData>;
    fn get_by_gamepad(&self, pad: u8, code: Keycode) -> Option<&ElementData>;
}

#[derive(Clone, Debug, Default)]
pub struct ElementDataHolder {
    by_code: HashMap<Keycode, ElementData>,
    by_gamepad: HashMap<(u8, Keycode), ElementData>,
}

impl ElementDataHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty() && self.by_gamepad.is_empty()
    }

    pub fn set(&mut self, code: Keycode, data: ElementData) {
        self.by_code.insert(code, data);
    }

    pub fn set_gamepad(&mut self, pad: u8, code: Keycode, data: ElementData) {
        self.by_gamepad.insert((pad, code), data);
    }

    pub fn remove(&mut self, code: Keycode) -> Option<ElementData> {
        self.by_code.remove(&code)
    }

    pub fn remove_gamepad(&mut self, pad: u8, code: Keycode) -> Option<ElementData> {
        self.by_gamepad.remove(&(pad, code))
    }

    pub fn clear(&mut self) {
        self.by_code.clear();
        self.by_gamepad.clear();
    }

    /// Drop the accumulated mouse delta so the next motion batch starts at zero.
    pub fn reset_motion(&mut self) {
        self.by_code.remove(&keycode::MOUSE_MOVEMENT);
    }

    /// Drop transient records (wheel direction, mouse deltas).
    ///
    /// Called by the capture loop before each batch of events so a scroll or a
    /// motion burst only shows for as long as it is being reported.
    pub fn decay(&mut self) {
        self.by_code.remove(&keycode::MOUSE_MOVEMENT);
        let idle = match self.by_code.get_mut(&keycode::MOUSE_WHEEL) {
            Some(ElementData::Wheel { state, direction }) => {
                *direction = WheelDirection::None;
                !state.is_pressed()
            }
            _ => false,
        };
        if idle {
            self.by_code.remove(&keycode::MOUSE_WHEEL);
        }
    }

    /// Fold one input change into the stored records.
    pub fn apply(&mut self, kind: &InputKind) {
        match *kind {
            InputKind::KeyPressed { code } => {
                self.set(code, ElementData::Button { state: ButtonState::Pressed });
                if code == keycode::MOUSE_MIDDLE {
                    *self.wheel_mut().0 = ButtonState::Pressed;
                }
            }
            InputKind::KeyReleased { code } => {
                self.remove(code);
                if code == keycode::MOUSE_MIDDLE {
                    *self.wheel_mut().0 = ButtonState::Released;
                }
            }
            InputKind::ButtonPressed { pad, code } => self.pad_button(pad, code, true),
            InputKind::ButtonReleased { pad, code } => self.pad_button(pad, code, false),
            InputKind::AxisMoved { pad, axis, value } => self.pad_axis(pad, axis, value),
            InputKind::HatChanged { pad, value } => {
                let direction = DpadDirection::from_hat(value);
                if direction == DpadDirection::Center {
                    self.remove_gamepad(pad, keycode::PAD_DPAD);
                } else {
                    self.set_gamepad(
                        pad,
                        keycode::PAD_DPAD,
                        ElementData::DPad {
                            direction,
                            state: ButtonState::Pressed,
                        },
                    );
                }
            }
            InputKind::MouseMoved { dx, dy } => {
                let entry = self
                    .by_code
                    .entry(keycode::MOUSE_MOVEMENT)
                    .or_insert(ElementData::MouseMovement { dx: 0, dy: 0 });
                if let ElementData::MouseMovement { dx: x, dy: y } = entry {
                    *x = x.saturating_add(dx);
                    *y = y.saturating_add(dy);
                }
            }
            InputKind::WheelScrolled { delta } => {
                let direction = match delta {
                    d if d > 0 => WheelDirection::Up,
                    d if d < 0 => WheelDirection::Down,
                    _ => WheelDirection::None,
                };
                *self.wheel_mut().1 = direction;
            }
        }
    }

    fn wheel_mut(&mut self) -> (&mut ButtonState, &mut WheelDirection) {
        let entry = self
            .by_code
            .entry(keycode::MOUSE_WHEEL)
            .or_insert(ElementData::Wheel {
                state: ButtonState::Released,
                direction: WheelDirection::None,
            });
        if !matches!(entry, ElementData::Wheel { .. }) {
            *entry = ElementData::Wheel {
                state: ButtonState::Released,
                direction: WheelDirection::None,
            };
        }
        match entry {
            ElementData::Wheel { state, direction } => (state, direction),
            _ => unreachable!("wheel record replaced above"),
        }
    }

    fn sticks_mut(&mut self, pad: u8) -> &mut StickData {
        let entry = self
            .by_gamepad
            .entry((pad, keycode::PAD_STICKS))
            .or_insert(ElementData::AnalogStick(StickData::default()));
        if !matches!(entry, ElementData::AnalogStick(_)) {
            *entry = ElementData::AnalogStick(StickData::default());
        }
        match entry {
            ElementData::AnalogStick(stick) => stick,
            _ => unreachable!("stick record replaced above"),
        }
    }

    fn pad_button(&mut self, pad: u8, code: Keycode, pressed: bool) {
        if pressed {
            self.set_gamepad(pad, code, ElementData::Button { state: ButtonState::Pressed });
        } else {
            self.remove_gamepad(pad, code);
        }

        match code {
            keycode::PAD_L_THUMB => self.sticks_mut(pad).left_state = pressed.into(),
            keycode::PAD_R_THUMB => self.sticks_mut(pad).right_state = pressed.into(),
            _ => {}
        }
    }

    fn pad_axis(&mut self, pad: u8, axis: PadAxis, value: f32) {
        match axis {
            PadAxis::LeftX => self.sticks_mut(pad).left_x = value.clamp(-1.0, 1.0),
            PadAxis::LeftY => self.sticks_mut(pad).left_y = value.clamp(-1.0, 1.0),
            PadAxis::RightX => self.sticks_mut(pad).right_x = value.clamp(-1.0, 1.0),
            PadAxis::RightY => self.sticks_mut(pad).right_y = value.clamp(-1.0, 1.0),
            PadAxis::LeftTrigger | PadAxis::RightTrigger => {
                let value = value.clamp(0.0, 1.0);
                let entry = self
                    .by_gamepad
                    .entry((pad, keycode::PAD_TRIGGERS))
                    .or_insert(ElementData::Trigger {
                        left: 0.0,
                        right: 0.0,
                        channels: TriggerChannels::all(),
                    });
                if let ElementData::Trigger { left, right, .. } = entry {
                    if axis == PadAxis::LeftTrigger {
                        *left = value;
                    } else {
                        *right = value;
                    }
                }
            }
        }
    }
}

impl DataSource for ElementDataHolder {
    fn get_by_code(&self, code: Keycode) -> Option<&ElementData> {
        self.by_code.get(&code)
    }

    fn get_by_gamepad(&self, pad: u8, code: Keycode) -> Option<&ElementData> {
        self.by_gamepad.get(&(pad, code))
    }
}
