//! Graphics backend seam.
//!
//! The overlay never touches pixels itself. It decodes the texture atlas with
//! `image`, hands the RGBA buffer to a [`GraphicsBackend`] for upload, and asks
//! the backend to draw atlas regions ([`Sprite`]) during draw dispatch.
//!
//! Uploads and frees happen inside a context bracket ([`enter_context`]) so
//! they cannot race with frame presentation. Draw calls are issued from the
//! host's render callback, which is already inside the backend's context.
//!
//! [`RecordingBackend`] is a headless backend that records every call.

use crate::error::{OverlayError, Result};
use image::RgbaImage;
use std::ops::{Deref, DerefMut};
use std::path::Path;

/// Opaque handle for an uploaded texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Opaque shader/effect handle passed through to every draw call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Effect(pub u64);

/// One atlas region placed on the overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sprite {
    /// Destination position in overlay pixels.
    pub x: f32,
    pub y: f32,
    /// Source region in atlas pixels.
    pub u: u32,
    pub v: u32,
    pub width: u32,
    pub height: u32,
    /// Clockwise rotation around the sprite center, in radians.
    pub rotation: f32,
}

/// An uploaded atlas and its pixel size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Texture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

pub trait GraphicsBackend {
    fn enter_context(&mut self);
    fn leave_context(&mut self);

    fn upload(&mut self, image: &RgbaImage) -> Result<TextureId>;
    fn free(&mut self, texture: TextureId);

    fn draw_sprite(&mut self, effect: Effect, texture: TextureId, sprite: &Sprite);
}

/// Scoped context acquisition. Leaves the context on drop.
pub struct ContextGuard<'a, B: GraphicsBackend + ?Sized> {
    backend: &'a mut B,
}

pub fn enter_context<B: GraphicsBackend + ?Sized>(backend: &mut B) -> ContextGuard<'_, B> {
    backend.enter_context();
    ContextGuard { backend }
}

impl<B: GraphicsBackend + ?Sized> Deref for ContextGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.backend
    }
}

impl<B: GraphicsBackend + ?Sized> DerefMut for ContextGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.backend
    }
}

impl<B: GraphicsBackend + ?Sized> Drop for ContextGuard<'_, B> {
    fn drop(&mut self) {
        self.backend.leave_context();
    }
}

/// Decode `path` and upload it inside a context bracket.
pub fn load_texture<B: GraphicsBackend + ?Sized>(backend: &mut B, path: &Path) -> Result<Texture> {
    let image = image::open(path)
        .map_err(|source| OverlayError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let (width, height) = image.dimensions();

    let id = enter_context(backend).upload(&image)?;
    Ok(Texture { id, width, height })
}

pub fn free_texture<B: GraphicsBackend + ?Sized>(backend: &mut B, texture: Texture) {
    enter_context(backend).free(texture.id);
}

/// A draw call captured by [`RecordingBackend`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub effect: Effect,
    pub texture: TextureId,
    pub sprite: Sprite,
}

/// Headless backend that records what it is asked to do.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u64,
    depth: u32,
    /// Textures currently uploaded, with their sizes.
    pub live: Vec<(TextureId, u32, u32)>,
    pub draws: Vec<DrawCall>,
    /// Upload or free calls made outside a context bracket.
    pub unbracketed: u32,
    /// Fail every upload (simulates a lost device).
    pub fail_uploads: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_context(&self) -> bool {
        self.depth > 0
    }

    /// Take the draws recorded so far.
    pub fn take_draws(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draws)
    }
}

impl GraphicsBackend for RecordingBackend {
    fn enter_context(&mut self) {
        self.depth += 1;
    }

    fn leave_context(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn upload(&mut self, image: &RgbaImage) -> Result<TextureId> {
        if !self.in_context() {
            self.unbracketed += 1;
        }
        if self.fail_uploads {
            return Err(OverlayError::Upload("device lost".into()));
        }
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.live.push((id, image.width(), image.height()));
        Ok(id)
    }

    fn free(&mut self, texture: TextureId) {
        if !self.in_context() {
            self.unbracketed += 1;
        }
        self.live.retain(|(id, _, _)| *id != texture);
    }

    fn draw_sprite(&mut self, effect: Effect, texture: TextureId, sprite: &Sprite) {
        self.draws.push(DrawCall {
            effect,
            texture,
            sprite: *sprite,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_happens_inside_the_bracket() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("atlas.png");
        RgbaImage::new(64, 32).save(&path).expect("write png");

        let mut gfx = RecordingBackend::new();
        let texture = load_texture(&mut gfx, &path).expect("texture loads");
        assert_eq!((texture.width, texture.height), (64, 32));
        assert_eq!(gfx.unbracketed, 0);
        assert!(!gfx.in_context());
        assert_eq!(gfx.live.len(), 1);

        free_texture(&mut gfx, texture);
        assert!(gfx.live.is_empty());
        assert_eq!(gfx.unbracketed, 0);
    }

    #[test]
    fn missing_image_is_an_error() {
        let mut gfx = RecordingBackend::new();
        let err = load_texture(&mut gfx, Path::new("/nope/atlas.png"));
        assert!(matches!(err, Err(OverlayError::Image { .. })));
        assert!(gfx.live.is_empty());
    }

    #[test]
    fn failed_upload_still_leaves_the_context() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("atlas.png");
        RgbaImage::new(8, 8).save(&path).expect("write png");

        let mut gfx = RecordingBackend {
            fail_uploads: true,
            ..RecordingBackend::default()
        };
        assert!(matches!(
            load_texture(&mut gfx, &path),
            Err(OverlayError::Upload(_))
        ));
        assert!(!gfx.in_context());
    }
}
