#![allow(dead_code)]

use image::RgbaImage;
use std::path::PathBuf;
use stickup_overlay::gfx::RecordingBackend;
use stickup_overlay::producer::Producers;
use stickup_overlay::{Overlay, OverlaySettings};
use tempfile::TempDir;

/// Two buttons sharing 0x41 plus a wheel on code 0x01.
pub const SHARED_KEYS: &str = r#"
first_element = "a_big"

a_big_type = 1
a_big_code = 0x41
a_big_u = 0
a_big_v = 0
a_big_w = 32
a_big_h = 32
a_big_next = "a_small"

a_small_type = 1
a_small_code = 0x41
a_small_x = 40
a_small_u = 0
a_small_v = 70
a_small_w = 16
a_small_h = 16
a_small_next = "wheel"

wheel_type = 4
wheel_code = 0x01
wheel_x = 80
wheel_u = 64
wheel_v = 0
wheel_w = 20
wheel_h = 30
"#;

/// Files for one overlay on disk.
pub struct Fixture {
    pub dir: TempDir,
    pub image: PathBuf,
    pub layout: PathBuf,
}

impl Fixture {
    pub fn new(layout: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let image = dir.path().join("atlas.png");
        let layout_path = dir.path().join("layout.toml");
        RgbaImage::new(128, 96).save(&image).expect("write atlas");
        std::fs::write(&layout_path, layout).expect("write layout");
        Self {
            dir,
            image,
            layout: layout_path,
        }
    }

    pub fn settings(&self) -> OverlaySettings {
        OverlaySettings::new(&self.image, &self.layout)
    }

    pub fn overlay(&self, producers: &Producers) -> Overlay<RecordingBackend> {
        Overlay::new(self.settings(), RecordingBackend::new(), producers.clone())
    }
}
