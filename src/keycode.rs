//! Virtual keycodes for inputs that have no keyboard scancode.
//!
//! Keyboard keys use their plain virtual-key value (`0x41` = `A`). Mouse and
//! gamepad inputs live in reserved high ranges so a single `u16` keyspace covers
//! every element:
//!
//! - `0xED00..=0xEDFF`: mouse buttons, wheel and movement
//! - `0xEC00..=0xECFF`: gamepad buttons and the combined stick/trigger/D-pad records

/// Keycode type shared by elements, producers and the overlay data map.
pub type Keycode = u16;

pub const MOUSE_LEFT: Keycode = 0xED01;
pub const MOUSE_RIGHT: Keycode = 0xED02;
pub const MOUSE_MIDDLE: Keycode = 0xED03;
pub const MOUSE_WHEEL: Keycode = 0xED11;
pub const MOUSE_MOVEMENT: Keycode = 0xED12;

const GAMEPAD_MASK: Keycode = 0xFF00;
const GAMEPAD_BASE: Keycode = 0xEC00;

pub const PAD_A: Keycode = 0xEC00;
pub const PAD_B: Keycode = 0xEC01;
pub const PAD_X: Keycode = 0xEC02;
pub const PAD_Y: Keycode = 0xEC03;
pub const PAD_LB: Keycode = 0xEC04;
pub const PAD_RB: Keycode = 0xEC05;
pub const PAD_BACK: Keycode = 0xEC06;
pub const PAD_START: Keycode = 0xEC07;
pub const PAD_L_THUMB: Keycode = 0xEC08;
pub const PAD_R_THUMB: Keycode = 0xEC09;
pub const PAD_GUIDE: Keycode = 0xEC10;

/// Both thumbsticks (axes and stick clicks) share one record.
pub const PAD_STICKS: Keycode = 0xEC40;
/// Both analog triggers share one record.
pub const PAD_TRIGGERS: Keycode = 0xEC41;
pub const PAD_DPAD: Keycode = 0xEC42;

/// Number of gamepads a producer tracks.
pub const MAX_GAMEPADS: u8 = 4;

#[inline]
pub fn is_gamepad_code(code: Keycode) -> bool {
    code & GAMEPAD_MASK == GAMEPAD_BASE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_gamepad_range() {
        assert!(is_gamepad_code(PAD_A));
        assert!(is_gamepad_code(PAD_STICKS));
        assert!(!is_gamepad_code(0x41));
        assert!(!is_gamepad_code(MOUSE_WHEEL));
    }
}
