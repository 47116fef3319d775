use super::{Element, ElementBase, ElementKind, SourceAffinity};
use crate::config::ConfigSource;
use crate::data::ElementData;
use crate::gfx::{Effect, GraphicsBackend, Texture};
use crate::settings::OverlaySettings;

/// Keyboard key, mouse button or gamepad button.
///
/// Gamepad keycodes (`0xEC00..=0xECFF`) are looked up on the selected gamepad,
/// everything else by plain keycode.
#[derive(Debug, Default)]
pub struct ButtonElement {
    base: ElementBase,
}

impl Element for ButtonElement {
    fn kind(&self) -> ElementKind {
        ElementKind::Button
    }

    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn source(&self) -> SourceAffinity {
        SourceAffinity::for_code(self.base.keycode)
    }

    fn load(&mut self, cfg: &mut dyn ConfigSource, id: &str) {
        self.base.load(cfg, id, None);
    }

    fn draw(
        &self,
        gfx: &mut dyn GraphicsBackend,
        effect: Effect,
        texture: &Texture,
        data: Option<&ElementData>,
        _settings: &OverlaySettings,
    ) {
        let pressed = data.is_some_and(ElementData::is_pressed);
        gfx.draw_sprite(effect, texture.id, &self.base.sprite(0, pressed as u32));
    }
}
