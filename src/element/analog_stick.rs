use super::{Element, ElementBase, ElementKind, Side, SourceAffinity};
use crate::config::ConfigSource;
use crate::data::{ElementData, StickData};
use crate::gfx::{Effect, GraphicsBackend, Texture};
use crate::keycode;
use crate::settings::OverlaySettings;

/// One thumbstick, moved by its axes and swapped to the pressed look on click.
#[derive(Debug, Default)]
pub struct AnalogStickElement {
    base: ElementBase,
    side: Side,
    /// Maximum travel in overlay pixels.
    radius: f32,
}

impl Element for AnalogStickElement {
    fn kind(&self) -> ElementKind {
        ElementKind::AnalogStick
    }

    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn source(&self) -> SourceAffinity {
        SourceAffinity::Gamepad
    }

    fn load(&mut self, cfg: &mut dyn ConfigSource, id: &str) {
        self.base.load(cfg, id, Some(keycode::PAD_STICKS));
        self.side = Side::from_config(cfg.get_int(&format!("{id}_side"), true));
        self.radius = cfg.get_float(&format!("{id}_radius"), true) as f32;
    }

    fn draw(
        &self,
        gfx: &mut dyn GraphicsBackend,
        effect: Effect,
        texture: &Texture,
        data: Option<&ElementData>,
        _settings: &OverlaySettings,
    ) {
        let stick = match data {
            Some(ElementData::AnalogStick(stick)) => *stick,
            _ => StickData::default(),
        };
        let (x, y, pressed) = match self.side {
            Side::Left => (stick.left_x, stick.left_y, stick.left_state.is_pressed()),
            Side::Right => (stick.right_x, stick.right_y, stick.right_state.is_pressed()),
        };

        let mut sprite = self.base.sprite(0, pressed as u32);
        sprite.x += x * self.radius;
        sprite.y += y * self.radius;
        gfx.draw_sprite(effect, texture.id, &sprite);
    }
}
