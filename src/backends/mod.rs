//! Input backends for the local capture side.
//!
//! Implementations of [`Device`](crate::device::Device) that feed
//! [`CaptureManager`](crate::manager::CaptureManager). OS-level hooks live in
//! the host application; it forwards their events through a device of its own
//! or through [`virtual_input::VirtualDevice`].

pub mod virtual_input;
