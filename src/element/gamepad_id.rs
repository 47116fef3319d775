use super::{Element, ElementBase, ElementKind, SourceAffinity};
use crate::config::ConfigSource;
use crate::data::ElementData;
use crate::gfx::{Effect, GraphicsBackend, Texture};
use crate::keycode::{self, MAX_GAMEPADS};
use crate::settings::OverlaySettings;

/// Player indicator for the selected gamepad, lit up while the guide button
/// is held.
///
/// Atlas columns `0..4` are the four player marks, column 4 the guide overlay.
#[derive(Debug, Default)]
pub struct GamepadIdElement {
    base: ElementBase,
}

impl Element for GamepadIdElement {
    fn kind(&self) -> ElementKind {
        ElementKind::GamepadId
    }

    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn source(&self) -> SourceAffinity {
        SourceAffinity::Gamepad
    }

    fn load(&mut self, cfg: &mut dyn ConfigSource, id: &str) {
        self.base.load(cfg, id, Some(keycode::PAD_GUIDE));
    }

    fn draw(
        &self,
        gfx: &mut dyn GraphicsBackend,
        effect: Effect,
        texture: &Texture,
        data: Option<&ElementData>,
        settings: &OverlaySettings,
    ) {
        let column = u32::from(settings.gamepad.min(MAX_GAMEPADS - 1));
        gfx.draw_sprite(effect, texture.id, &self.base.sprite(column, 0));

        if data.is_some_and(ElementData::is_pressed) {
            gfx.draw_sprite(effect, texture.id, &self.base.sprite(4, 0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::data::ButtonState;

    #[test]
    fn column_follows_selected_gamepad() {
        let e = load(ElementKind::GamepadId, "e_u = 0\ne_v = 0\ne_w = 10\ne_h = 10\n");
        let settings = OverlaySettings {
            gamepad: 2,
            ..OverlaySettings::default()
        };
        let draws = draw_with(e.as_ref(), None, &settings);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].sprite.u, 26);

        let guide = ElementData::Button {
            state: ButtonState::Pressed,
        };
        let draws = draw_with(e.as_ref(), Some(&guide), &settings);
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[1].sprite.u, 52);
    }
}
