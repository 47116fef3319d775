use crate::event::PadAxis;
use crate::keycode::Keycode;
use crate::{Device, InputKind};
use std::sync::{Arc, Mutex, PoisonError};

/// Scriptable device. Clones share one event queue, so a clone kept by the
/// host can inject events while the capture thread polls the original.
#[derive(Clone, Debug, Default)]
pub struct VirtualDevice {
    id: String,
    name: String,
    events: Arc<Mutex<Vec<InputKind>>>,
}

impl VirtualDevice {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            events: Arc::default(),
        }
    }

    /// Inject a raw input event into the virtual device.
    pub fn feed(&self, event: InputKind) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    pub fn press_key(&self, code: Keycode) {
        self.feed(InputKind::KeyPressed { code });
    }

    pub fn release_key(&self, code: Keycode) {
        self.feed(InputKind::KeyReleased { code });
    }

    pub fn press_button(&self, pad: u8, code: Keycode) {
        self.feed(InputKind::ButtonPressed { pad, code });
    }

    pub fn release_button(&self, pad: u8, code: Keycode) {
        self.feed(InputKind::ButtonReleased { pad, code });
    }

    /// Convenience method to set an axis value.
    pub fn set_axis(&self, pad: u8, axis: PadAxis, value: f32) {
        self.feed(InputKind::AxisMoved { pad, axis, value });
    }
}

impl Device for VirtualDevice {
    fn poll(&mut self) -> Vec<InputKind> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }
}
