use super::{Element, ElementBase, ElementKind, Side, SourceAffinity};
use crate::config::ConfigSource;
use crate::data::ElementData;
use crate::gfx::{Effect, GraphicsBackend, Texture};
use crate::keycode;
use crate::settings::OverlaySettings;

/// Value above which a trigger in button mode counts as pressed.
const BUTTON_THRESHOLD: f32 = 0.5;

/// Direction in which the pressed region grows as the trigger is pulled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl FillDirection {
    fn from_config(value: i64) -> Self {
        match value {
            1 => FillDirection::Down,
            2 => FillDirection::Left,
            3 => FillDirection::Right,
            _ => FillDirection::Up,
        }
    }
}

/// Analog trigger (LT/RT).
///
/// The released region is always drawn; the pressed region (one row down) is
/// cropped to the pulled fraction, or drawn whole past the threshold in button
/// mode.
#[derive(Debug, Default)]
pub struct TriggerElement {
    base: ElementBase,
    side: Side,
    direction: FillDirection,
    button_mode: bool,
}

impl TriggerElement {
    fn value(&self, data: Option<&ElementData>) -> f32 {
        match (data, self.side) {
            (Some(ElementData::Trigger { left, .. }), Side::Left) => *left,
            (Some(ElementData::Trigger { right, .. }), Side::Right) => *right,
            _ => 0.0,
        }
    }
}

impl Element for TriggerElement {
    fn kind(&self) -> ElementKind {
        ElementKind::Trigger
    }

    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn source(&self) -> SourceAffinity {
        SourceAffinity::Gamepad
    }

    fn load(&mut self, cfg: &mut dyn ConfigSource, id: &str) {
        self.base.load(cfg, id, Some(keycode::PAD_TRIGGERS));
        self.side = Side::from_config(cfg.get_int(&format!("{id}_side"), true));
        self.direction = FillDirection::from_config(cfg.get_int(&format!("{id}_direction"), true));
        self.button_mode = cfg.get_bool(&format!("{id}_button_mode"), true);
    }

    fn draw(
        &self,
        gfx: &mut dyn GraphicsBackend,
        effect: Effect,
        texture: &Texture,
        data: Option<&ElementData>,
        _settings: &OverlaySettings,
    ) {
        let value = self.value(data).clamp(0.0, 1.0);

        if self.button_mode {
            let pressed = value > BUTTON_THRESHOLD;
            gfx.draw_sprite(effect, texture.id, &self.base.sprite(0, pressed as u32));
            return;
        }

        gfx.draw_sprite(effect, texture.id, &self.base.sprite(0, 0));
        if value <= 0.0 {
            return;
        }

        let mut fill = self.base.sprite(0, 1);
        match self.direction {
            FillDirection::Up | FillDirection::Down => {
                let shown = ((fill.height as f32 * value).round() as u32).min(fill.height);
                if self.direction == FillDirection::Up {
                    let hidden = fill.height - shown;
                    fill.v = fill.v.saturating_add(hidden);
                    fill.y += hidden as f32;
                }
                fill.height = shown;
            }
            FillDirection::Left | FillDirection::Right => {
                let shown = ((fill.width as f32 * value).round() as u32).min(fill.width);
                if self.direction == FillDirection::Left {
                    let hidden = fill.width - shown;
                    fill.u = fill.u.saturating_add(hidden);
                    fill.x += hidden as f32;
                }
                fill.width = shown;
            }
        }
        gfx.draw_sprite(effect, texture.id, &fill);
    }
}
