use super::{Element, ElementBase, ElementKind, SourceAffinity};
use crate::config::ConfigSource;
use crate::data::ElementData;
use crate::gfx::{Effect, GraphicsBackend, Texture};
use crate::keycode;
use crate::settings::OverlaySettings;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MovementMode {
    /// A dot pushed toward the motion, at most `radius` away.
    #[default]
    Dot,
    /// An arrow rotated to point along the motion.
    Arrow,
}

/// Mouse motion indicator.
#[derive(Debug, Default)]
pub struct MouseMovementElement {
    base: ElementBase,
    mode: MovementMode,
    radius: f32,
}

impl Element for MouseMovementElement {
    fn kind(&self) -> ElementKind {
        ElementKind::MouseMovement
    }

    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn source(&self) -> SourceAffinity {
        SourceAffinity::MousePosition
    }

    fn load(&mut self, cfg: &mut dyn ConfigSource, id: &str) {
        self.base.load(cfg, id, Some(keycode::MOUSE_MOVEMENT));
        self.mode = if cfg.get_int(&format!("{id}_mode"), true) == 1 {
            MovementMode::Arrow
        } else {
            MovementMode::Dot
        };
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
        let (dx, dy) = match data {
            Some(ElementData::MouseMovement { dx, dy }) => (*dx as f32, *dy as f32),
            _ => (0.0, 0.0),
        };
        let length = dx.hypot(dy);
        let mut sprite = self.base.sprite(0, 0);

        if length > 0.0 {
            match self.mode {
                MovementMode::Dot => {
                    let travel = length.min(self.radius);
                    sprite.x += dx / length * travel;
                    sprite.y += dy / length * travel;
                }
                MovementMode::Arrow => sprite.rotation = dy.atan2(dx),
            }
        }
        gfx.draw_sprite(effect, texture.id, &sprite);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn dot_travel_is_clamped_to_radius() {
        let e = load(
            ElementKind::MouseMovement,
            "e_x = 50\ne_y = 50\ne_u = 0\ne_v = 0\ne_w = 8\ne_h = 8\ne_radius = 5\n",
        );
        assert_eq!(e.source(), SourceAffinity::MousePosition);

        let data = ElementData::MouseMovement { dx: 30, dy: -40 };
        let s = draw(e.as_ref(), Some(&data))[0].sprite;
        assert!((s.x - 53.0).abs() < 1e-4);
        assert!((s.y - 46.0).abs() < 1e-4);

        let small = ElementData::MouseMovement { dx: 2, dy: 0 };
        assert_eq!(draw(e.as_ref(), Some(&small))[0].sprite.x, 52.0);
    }

    #[test]
    fn arrow_points_along_motion() {
        let e = load(
            ElementKind::MouseMovement,
            "e_u = 0\ne_v = 0\ne_w = 8\ne_h = 8\ne_mode = 1\n",
        );
        let data = ElementData::MouseMovement { dx: 0, dy: 10 };
        let s = draw(e.as_ref(), Some(&data))[0].sprite;
        assert!((s.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!((s.x, s.y), (0.0, 0.0));
    }
}
