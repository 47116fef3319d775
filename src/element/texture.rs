use super::{Element, ElementBase, ElementKind, SourceAffinity};
use crate::config::ConfigSource;
use crate::data::ElementData;
use crate::gfx::{Effect, GraphicsBackend, Texture};
use crate::settings::OverlaySettings;

/// Static atlas region (backgrounds, labels).
#[derive(Debug, Default)]
pub struct TextureElement {
    base: ElementBase,
}

impl Element for TextureElement {
    fn kind(&self) -> ElementKind {
        ElementKind::Texture
    }

    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn source(&self) -> SourceAffinity {
        SourceAffinity::None
    }

    fn load(&mut self, cfg: &mut dyn ConfigSource, id: &str) {
        self.base.load(cfg, id, Some(0));
    }

    fn draw(
        &self,
        gfx: &mut dyn GraphicsBackend,
        effect: Effect,
        texture: &Texture,
        _data: Option<&ElementData>,
        _settings: &OverlaySettings,
    ) {
        gfx.draw_sprite(effect, texture.id, &self.base.sprite(0, 0));
    }
}
