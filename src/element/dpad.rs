use super::{Element, ElementBase, ElementKind, SourceAffinity};
use crate::config::ConfigSource;
use crate::data::{DpadDirection, ElementData};
use crate::gfx::{Effect, GraphicsBackend, Texture};
use crate::keycode;
use crate::settings::OverlaySettings;

/// D-pad. Nine atlas columns: neutral, then one per [`DpadDirection`].
#[derive(Debug, Default)]
pub struct DPadElement {
    base: ElementBase,
}

impl Element for DPadElement {
    fn kind(&self) -> ElementKind {
        ElementKind::DPad
    }

    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn source(&self) -> SourceAffinity {
        SourceAffinity::Gamepad
    }

    fn load(&mut self, cfg: &mut dyn ConfigSource, id: &str) {
        self.base.load(cfg, id, Some(keycode::PAD_DPAD));
    }

    fn draw(
        &self,
        gfx: &mut dyn GraphicsBackend,
        effect: Effect,
        texture: &Texture,
        data: Option<&ElementData>,
        _settings: &OverlaySettings,
    ) {
        let direction = match data {
            Some(ElementData::DPad { direction, state }) if state.is_pressed() => *direction,
            _ => DpadDirection::Center,
        };
        gfx.draw_sprite(
            effect,
            texture.id,
            &self.base.sprite(direction.region_index(), 0),
        );
    }
}
