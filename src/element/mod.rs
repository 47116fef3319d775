//! Visual elements.
//!
//! An element is one atlas-backed unit of the overlay: a key, a stick, a
//! trigger, ... Every element has a stable id (its descriptor name in the
//! layout), a keycode and a [`SourceAffinity`] that tells the refresh cycle how
//! to look its data up. Elements are immutable once loaded.
//!
//! The set of kinds is closed. [`ElementKind::from_tag`], [`ElementKind::name`]
//! and [`create`] are the only places that enumerate it and are kept together
//! below.
//!
//! # Atlas conventions
//! Each descriptor names a base region (`u`, `v`, `w`, `h`). Alternate looks of
//! the same element are laid out next to it with a 3px gap: columns to the
//! right (`u + n * (w + 3)`), the pressed look one row down (`v + h + 3`).

mod analog_stick;
mod button;
mod dpad;
mod gamepad_id;
mod mouse_movement;
mod texture;
mod trigger;
mod wheel;

pub use analog_stick::AnalogStickElement;
pub use button::ButtonElement;
pub use dpad::DPadElement;
pub use gamepad_id::GamepadIdElement;
pub use mouse_movement::{MouseMovementElement, MovementMode};
pub use texture::TextureElement;
pub use trigger::{FillDirection, TriggerElement};
pub use wheel::WheelElement;

use crate::config::ConfigSource;
use crate::data::ElementData;
use crate::gfx::{Effect, GraphicsBackend, Sprite, Texture};
use crate::keycode::{self, Keycode};
use crate::settings::OverlaySettings;
use std::fmt;

/// Gap between alternate regions in the atlas.
pub const REGION_GAP: u32 = 3;

/// Layout tag reserved for text elements, which are not rendered yet.
pub const TEXT_TAG: i64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Texture,
    Button,
    AnalogStick,
    Wheel,
    MouseMovement,
    Trigger,
    GamepadId,
    DPad,
}

impl ElementKind {
    /// Map a layout `<id>_type` value to a kind. Text and unknown tags yield `None`.
    pub fn from_tag(tag: i64) -> Option<Self> {
        match tag {
            0 => Some(ElementKind::Texture),
            1 => Some(ElementKind::Button),
            2 => Some(ElementKind::AnalogStick),
            4 => Some(ElementKind::Wheel),
            5 => Some(ElementKind::MouseMovement),
            6 => Some(ElementKind::Trigger),
            7 => Some(ElementKind::GamepadId),
            8 => Some(ElementKind::DPad),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Texture => "Texture",
            ElementKind::Button => "Button",
            ElementKind::AnalogStick => "Analog stick",
            ElementKind::Wheel => "Scroll wheel",
            ElementKind::MouseMovement => "Mouse movement",
            ElementKind::Trigger => "Trigger",
            ElementKind::GamepadId => "Gamepad ID",
            ElementKind::DPad => "DPad",
        }
    }
}

/// Display name for any layout tag, including unsupported ones.
pub fn tag_name(tag: i64) -> &'static str {
    match ElementKind::from_tag(tag) {
        Some(kind) => kind.name(),
        None if tag == TEXT_TAG => "Text",
        None => "Invalid",
    }
}

/// Construct an empty element of `kind`.
pub fn create(kind: ElementKind) -> Box<dyn Element> {
    match kind {
        ElementKind::Texture => Box::<TextureElement>::default(),
        ElementKind::Button => Box::<ButtonElement>::default(),
        ElementKind::AnalogStick => Box::<AnalogStickElement>::default(),
        ElementKind::Wheel => Box::<WheelElement>::default(),
        ElementKind::MouseMovement => Box::<MouseMovementElement>::default(),
        ElementKind::Trigger => Box::<TriggerElement>::default(),
        ElementKind::GamepadId => Box::<GamepadIdElement>::default(),
        ElementKind::DPad => Box::<DPadElement>::default(),
    }
}

/// Build the element described by `id`, or `None` for text/unknown kinds.
pub fn from_config(cfg: &mut dyn ConfigSource, id: &str, debug: bool) -> Option<Box<dyn Element>> {
    let tag = cfg.get_int(&format!("{id}_type"), false);
    let Some(kind) = ElementKind::from_tag(tag) else {
        if debug {
            log::info!("Skipping element {id}: type {tag} ({})", tag_name(tag));
        }
        return None;
    };

    let mut element = create(kind);
    element.load(cfg, id);

    if debug {
        log::info!(
            " Type: {:>14}, KEYCODE: 0x{:04X} ID: {}",
            kind.name(),
            element.keycode(),
            id
        );
    }
    Some(element)
}

/// How the refresh cycle looks up an element's data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceAffinity {
    /// By (selected gamepad, keycode).
    Gamepad,
    /// By keycode; the record carries pointer motion.
    MousePosition,
    /// By keycode.
    Default,
    /// Never fetched.
    None,
}

impl SourceAffinity {
    pub fn for_code(code: Keycode) -> Self {
        if keycode::is_gamepad_code(code) {
            SourceAffinity::Gamepad
        } else {
            SourceAffinity::Default
        }
    }
}

/// Which half of a gamepad an element shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    fn from_config(value: i64) -> Self {
        if value == 1 {
            Side::Right
        } else {
            Side::Left
        }
    }
}

/// Fields shared by every element kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementBase {
    pub id: String,
    pub keycode: Keycode,
    /// Destination position.
    pub x: f32,
    pub y: f32,
    /// Base atlas region.
    pub u: u32,
    pub v: u32,
    pub width: u32,
    pub height: u32,
}

impl ElementBase {
    /// Read geometry and keycode. Kinds with an implied code pass it as
    /// `default_code`, making `<id>_code` optional.
    pub fn load(&mut self, cfg: &mut dyn ConfigSource, id: &str, default_code: Option<Keycode>) {
        self.id = id.to_string();
        self.x = cfg.get_int(&format!("{id}_x"), true) as f32;
        self.y = cfg.get_int(&format!("{id}_y"), true) as f32;
        self.u = read_u32(cfg, &format!("{id}_u"));
        self.v = read_u32(cfg, &format!("{id}_v"));
        self.width = read_u32(cfg, &format!("{id}_w"));
        self.height = read_u32(cfg, &format!("{id}_h"));

        let key = format!("{id}_code");
        let raw = cfg.get_int(&key, default_code.is_some());
        self.keycode = match (raw, default_code) {
            (0, Some(code)) => code,
            (raw, _) => Keycode::try_from(raw).unwrap_or_else(|_| {
                log::warn!("Keycode {raw} of {id} is out of range");
                0
            }),
        };
    }

    /// Region at (`column`, `row`) relative to the base region, drawn at the
    /// element's position.
    pub fn sprite(&self, column: u32, row: u32) -> Sprite {
        Sprite {
            x: self.x,
            y: self.y,
            u: offset(self.u, column, self.width),
            v: offset(self.v, row, self.height),
            width: self.width,
            height: self.height,
            rotation: 0.0,
        }
    }
}

/// `base + index * (extent + REGION_GAP)`, saturating on oversized regions.
fn offset(base: u32, index: u32, extent: u32) -> u32 {
    extent
        .saturating_add(REGION_GAP)
        .saturating_mul(index)
        .saturating_add(base)
}

fn read_u32(cfg: &mut dyn ConfigSource, key: &str) -> u32 {
    let value = cfg.get_int(key, false);
    u32::try_from(value).unwrap_or_else(|_| {
        log::warn!("'{key}' = {value} is out of range");
        0
    })
}

pub trait Element: Send + fmt::Debug {
    fn kind(&self) -> ElementKind;
    fn base(&self) -> &ElementBase;
    fn source(&self) -> SourceAffinity;

    /// Populate the element from the descriptor `id`.
    fn load(&mut self, cfg: &mut dyn ConfigSource, id: &str);

    /// Issue draw calls for the current state. `data` is the record shared by
    /// every element with this keycode.
    fn draw(
        &self,
        gfx: &mut dyn GraphicsBackend,
        effect: Effect,
        texture: &Texture,
        data: Option<&ElementData>,
        settings: &OverlaySettings,
    );

    fn id(&self) -> &str {
        &self.base().id
    }

    fn keycode(&self) -> Keycode {
        self.base().keycode
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::LayoutDocument;
    use crate::gfx::{DrawCall, RecordingBackend, TextureId};

    pub const TEXTURE: Texture = Texture {
        id: TextureId(7),
        width: 256,
        height: 256,
    };

    pub fn load(kind: ElementKind, layout: &str) -> Box<dyn Element> {
        let mut doc = LayoutDocument::parse(layout);
        let mut element = create(kind);
        element.load(&mut doc, "e");
        assert!(!doc.has_errors(), "{}", doc.error_message());
        element
    }

    pub fn draw(element: &dyn Element, data: Option<&ElementData>) -> Vec<DrawCall> {
        draw_with(element, data, &OverlaySettings::default())
    }

    pub fn draw_with(
        element: &dyn Element,
        data: Option<&ElementData>,
        settings: &OverlaySettings,
    ) -> Vec<DrawCall> {
        let mut gfx = RecordingBackend::new();
        element.draw(&mut gfx, Effect(1), &TEXTURE, data, settings);
        gfx.take_draws()
    }
}
