use super::{Element, ElementBase, ElementKind, SourceAffinity};
use crate::config::ConfigSource;
use crate::data::{ElementData, WheelDirection};
use crate::gfx::{Effect, GraphicsBackend, Texture};
use crate::keycode;
use crate::settings::OverlaySettings;

/// Mouse wheel: idle/middle-pressed base plus an up/down scroll overlay.
///
/// Atlas columns: 0 idle, 1 middle pressed, 2 scrolling up, 3 scrolling down.
#[derive(Debug, Default)]
pub struct WheelElement {
    base: ElementBase,
}

impl Element for WheelElement {
    fn kind(&self) -> ElementKind {
        ElementKind::Wheel
    }

    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn source(&self) -> SourceAffinity {
        SourceAffinity::Default
    }

    fn load(&mut self, cfg: &mut dyn ConfigSource, id: &str) {
        self.base.load(cfg, id, Some(keycode::MOUSE_WHEEL));
    }

    fn draw(
        &self,
        gfx: &mut dyn GraphicsBackend,
        effect: Effect,
        texture: &Texture,
        data: Option<&ElementData>,
        _settings: &OverlaySettings,
    ) {
        let (pressed, direction) = match data {
            Some(ElementData::Wheel { state, direction }) => (state.is_pressed(), *direction),
            _ => (false, WheelDirection::None),
        };

        gfx.draw_sprite(effect, texture.id, &self.base.sprite(pressed as u32, 0));
        let overlay = match direction {
            WheelDirection::Up => 2,
            WheelDirection::Down => 3,
            WheelDirection::None => return,
        };
        gfx.draw_sprite(effect, texture.id, &self.base.sprite(overlay, 0));
    }
}
