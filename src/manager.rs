//! Local capture producer.
//!
//! [`CaptureManager`] polls its devices and folds their events into the hook
//! region of [`Producers`]. Devices are polled without any lock held; the hook
//! lock is taken only to apply the batch. [`CaptureManager::spawn`] runs the
//! loop on its own thread.

use crate::error::{OverlayError, Result};
use crate::producer::{HookState, Producers};
use crate::{Device, InputKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// How long wheel and motion records stay visible after their last event.
pub const DEFAULT_TRANSIENT_HOLD: Duration = Duration::from_millis(100);

pub struct CaptureManager {
    devices: Vec<Box<dyn Device>>,
    hook: Arc<Mutex<HookState>>,
    transient_hold: Duration,
    last_transient: Option<Instant>,
}

impl CaptureManager {
    pub fn new(producers: &Producers) -> Self {
        Self {
            devices: Vec::new(),
            hook: Arc::clone(producers.hook()),
            transient_hold: DEFAULT_TRANSIENT_HOLD,
            last_transient: None,
        }
    }

    pub fn with_transient_hold(mut self, hold: Duration) -> Self {
        self.transient_hold = hold;
        self
    }

    pub fn add_device<D: Device + 'static>(&mut self, device: D) {
        log::debug!("Capture device added: {} ({})", device.name(), device.id());
        self.devices.push(Box::new(device));
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Poll every device once and apply the events. Returns the event count.
    pub fn poll_all(&mut self) -> usize {
        let mut events = Vec::new();
        for device in self.devices.iter_mut() {
            events.extend(device.poll());
        }

        let now = Instant::now();
        let moved = events
            .iter()
            .any(|e| matches!(e, InputKind::MouseMoved { .. }));
        let transient = moved
            || events
                .iter()
                .any(|e| matches!(e, InputKind::WheelScrolled { .. }));
        let expired = self
            .last_transient
            .is_some_and(|at| now.duration_since(at) >= self.transient_hold);

        let mut hook = self.hook.lock().unwrap_or_else(PoisonError::into_inner);
        if expired && !transient {
            hook.data.decay();
            self.last_transient = None;
        }
        // Motion is a per-poll delta, not a running total.
        if moved {
            hook.data.reset_motion();
        }
        for event in &events {
            hook.data.apply(event);
        }
        hook.initialized = true;
        drop(hook);

        if transient {
            self.last_transient = Some(now);
        }
        events.len()
    }

    /// Run the poll loop on a dedicated thread until the handle is stopped.
    pub fn spawn(mut self, interval: Duration) -> Result<CaptureHandle> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let thread = std::thread::Builder::new()
            .name("stickup-capture".into())
            .spawn(move || {
                while !flag.load(Ordering::Relaxed) {
                    self.poll_all();
                    std::thread::sleep(interval);
                }
                self
            })
            .map_err(OverlayError::Spawn)?;

        Ok(CaptureHandle {
            stop,
            thread: Some(thread),
        })
    }
}

/// Running capture thread. Dropping the handle stops and joins it.
pub struct CaptureHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<CaptureManager>>,
}

impl CaptureHandle {
    /// Stop the loop and get the manager back. `None` if the thread panicked.
    pub fn stop(mut self) -> Option<CaptureManager> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<CaptureManager> {
        self.stop.store(true, Ordering::Relaxed);
        let thread = self.thread.take()?;
        match thread.join() {
            Ok(manager) => Some(manager),
            Err(_) => {
                log::warn!("Capture thread panicked");
                None
            }
        }
    }
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
