//! StickUp Overlay — input overlay core.
//!
//! Loads a layout of visual elements (keys, sticks, triggers, ...) over a
//! texture atlas, keeps one state record per keycode, and each frame merges
//! live input from either the local capture side or a remote client before
//! drawing.
//!
//! Per frame, on the render thread:
//! 1. [`Overlay::refresh_data`] takes both producer locks, picks one producer
//!    and merges its state into the overlay's records.
//! 2. [`Overlay::draw`] dispatches draw calls from those records, lock-free.

pub mod backends;
pub mod config;
pub mod data;
pub mod device;
pub mod element;
pub mod error;
pub mod event;
pub mod gfx;
pub mod holder;
pub mod keycode;
pub mod layout;
pub mod manager;
pub mod overlay;
pub mod producer;
pub mod settings;
pub mod snapshot;

pub use data::ElementData;
pub use device::*;
pub use error::OverlayError;
pub use event::*;
pub use manager::*;
pub use overlay::Overlay;
pub use settings::OverlaySettings;
