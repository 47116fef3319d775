//! The overlay: owns elements, their data records and the atlas texture.
//!
//! # Threading
//! An [`Overlay`] lives on the render thread. Producer threads never touch
//! it; they write into the [`Producers`] regions, and [`Overlay::refresh_data`]
//! copies from there into the overlay's own records once per frame, holding
//! both producer locks only for the copy. [`Overlay::draw`] then reads the
//! overlay's records without taking any lock.
//!
//! Load and unload must not run concurrently with a draw; the host pauses
//! rendering while reconfiguring.
//!
//! # Example
//! ```no_run
//! use stickup_overlay::gfx::{Effect, RecordingBackend};
//! use stickup_overlay::producer::Producers;
//! use stickup_overlay::{Overlay, OverlaySettings};
//!
//! let settings = OverlaySettings::new("wasd.png", "wasd.toml");
//! let producers = Producers::new();
//! let mut overlay = Overlay::new(settings, RecordingBackend::new(), producers.clone());
//!
//! // once per frame
//! overlay.refresh_data();
//! overlay.draw(Effect::default());
//! ```

use crate::config::LayoutDocument;
use crate::data::ElementData;
use crate::element::{Element, SourceAffinity};
use crate::error::{OverlayError, Result};
use crate::gfx::{self, Effect, GraphicsBackend, Texture};
use crate::holder::DataSource;
use crate::keycode::Keycode;
use crate::layout;
use crate::producer::{ActiveSource, Producers};
use crate::settings::OverlaySettings;
use crate::snapshot::DataSnapshot;
use std::collections::HashMap;

pub struct Overlay<B: GraphicsBackend> {
    settings: OverlaySettings,
    backend: B,
    producers: Producers,
    texture: Option<Texture>,
    elements: Vec<Box<dyn Element>>,
    data: HashMap<Keycode, ElementData>,
    loaded: bool,
}

impl<B: GraphicsBackend> Overlay<B> {
    /// Create the overlay and load it right away.
    pub fn new(settings: OverlaySettings, backend: B, producers: Producers) -> Self {
        let mut overlay = Self {
            settings,
            backend,
            producers,
            texture: None,
            elements: Vec::new(),
            data: HashMap::new(),
            loaded: false,
        };
        overlay.load();
        overlay
    }

    /// (Re)load texture and layout from the current settings.
    ///
    /// Always unloads first. On failure nothing is kept, the gamepad selection
    /// is reset and the logical size falls back to the default.
    pub fn load(&mut self) -> bool {
        self.unload();

        let image_loaded = self
            .load_texture()
            .inspect_err(|e| log::warn!("Failed to load texture: {e}"))
            .is_ok();
        self.loaded = image_loaded
            && self
                .load_layout()
                .inspect_err(|e| log::warn!("Failed to load layout: {e}"))
                .is_ok();

        if !self.loaded {
            self.unload();
            self.settings.gamepad = 0;
        }
        self.loaded
    }

    /// Release the texture and drop all elements and records.
    pub fn unload(&mut self) {
        if let Some(texture) = self.texture.take() {
            gfx::free_texture(&mut self.backend, texture);
        }
        self.elements.clear();
        self.data.clear();
        self.settings.reset_size();
        self.loaded = false;
    }

    fn load_texture(&mut self) -> Result<()> {
        if self.settings.image_file.as_os_str().is_empty() {
            return Err(OverlayError::MissingPath("image file"));
        }
        let texture = gfx::load_texture(&mut self.backend, &self.settings.image_file)?;
        self.settings.width = texture.width;
        self.settings.height = texture.height;
        self.texture = Some(texture);
        Ok(())
    }

    fn load_layout(&mut self) -> Result<()> {
        let path = &self.settings.layout_file;
        if path.as_os_str().is_empty() {
            return Err(OverlayError::MissingPath("layout file"));
        }

        let mut doc = LayoutDocument::open(path);
        let layout = layout::load(&mut doc, &path.display().to_string())?;
        if layout.debug {
            log::info!(
                "Loaded {} elements, {} records, size {}x{}",
                layout.elements.len(),
                layout.data.len(),
                layout.width,
                layout.height
            );
        }

        if layout.width > 0 {
            self.settings.width = layout.width;
        }
        if layout.height > 0 {
            self.settings.height = layout.height;
        }
        self.elements = layout.elements;
        self.data = layout.data;
        Ok(())
    }

    /// Pull the latest producer state into the overlay's records.
    ///
    /// Returns the producer that was read, or `None` when the cycle was
    /// skipped (no producer has data yet, or the selected client is gone).
    pub fn refresh_data(&mut self) -> Option<ActiveSource> {
        let producers = self.producers.lock();
        let active = producers.select(self.settings.selected_source)?;
        let Some(source) = producers.holder(active) else {
            log::debug!("No remote client for source {:?}", active);
            return None;
        };

        let pad = self.settings.gamepad;
        for element in &self.elements {
            let code = element.keycode();
            let fragment = match element.source() {
                SourceAffinity::Gamepad => source.get_by_gamepad(pad, code),
                SourceAffinity::Default | SourceAffinity::MousePosition => {
                    source.get_by_code(code)
                }
                // Nothing to pull; leave whatever a sibling merged this cycle.
                SourceAffinity::None => continue,
            };
            if let Some(record) = self.data.get_mut(&code) {
                record.merge(fragment);
            }
        }
        Some(active)
    }

    /// Draw every element in layout order. No-op unless loaded.
    pub fn draw(&mut self, effect: Effect) {
        if !self.loaded {
            return;
        }
        let Some(texture) = self.texture else {
            return;
        };
        for element in &self.elements {
            let data = self.data.get(&element.keycode());
            element.draw(&mut self.backend, effect, &texture, data, &self.settings);
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Paths changed here take effect on the next [`load`](Self::load).
    pub fn settings_mut(&mut self) -> &mut OverlaySettings {
        &mut self.settings
    }

    pub fn elements(&self) -> &[Box<dyn Element>] {
        &self.elements
    }

    pub fn data(&self, code: Keycode) -> Option<&ElementData> {
        self.data.get(&code)
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    pub fn producers(&self) -> &Producers {
        &self.producers
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Owned copy of the merged records.
    pub fn snapshot(&self) -> DataSnapshot {
        DataSnapshot(self.data.iter().map(|(k, v)| (*k, *v)).collect())
    }
}

impl<B: GraphicsBackend> Drop for Overlay<B> {
    fn drop(&mut self) {
        self.unload();
    }
}
