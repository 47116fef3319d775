//! Overlay settings.
//!
//! Owned by the host and handed to [`Overlay::new`](crate::overlay::Overlay::new).
//! `width`/`height` are derived on load (texture size, then layout override);
//! the rest is user configuration and can be persisted as TOML:
//!
//! ```toml
//! image_file = "layouts/wasd.png"
//! layout_file = "layouts/wasd.toml"
//! gamepad = 0
//! selected_source = 0
//! ```

use crate::error::{OverlayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Logical size used whenever nothing could be loaded.
pub const DEFAULT_SIZE: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Texture atlas path.
    pub image_file: PathBuf,
    /// Layout document path.
    pub layout_file: PathBuf,
    /// Logical width in pixels.
    pub width: u32,
    /// Logical height in pixels.
    pub height: u32,
    /// Gamepad index (`0..4`) used for gamepad-sourced elements.
    pub gamepad: u8,
    /// `0` = local capture, `n` = remote client `n - 1`.
    pub selected_source: u32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            image_file: PathBuf::new(),
            layout_file: PathBuf::new(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            gamepad: 0,
            selected_source: 0,
        }
    }
}

impl OverlaySettings {
    pub fn new(image_file: impl Into<PathBuf>, layout_file: impl Into<PathBuf>) -> Self {
        Self {
            image_file: image_file.into(),
            layout_file: layout_file.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| OverlayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|source| OverlayError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn reset_size(&mut self) {
        self.width = DEFAULT_SIZE;
        self.height = DEFAULT_SIZE;
    }
}
