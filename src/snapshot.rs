//! Owned copy of the overlay's merged records.
//!
//! [`DataSnapshot`] is a read-only view of every record at a point in time
//! (typically "this frame"), produced by
//! [`Overlay::snapshot`](crate::overlay::Overlay::snapshot). It is detached from
//! the overlay, so it can be handed to another thread or dumped for diagnostics.
//!
//! # Semantics
//! - Keys are keycodes, one per distinct code among the loaded elements.
//! - A snapshot is **immutable**. To update it, refresh the overlay and take a
//!   new one.
//!
//! # Example
//! ```no_run
//! use stickup_overlay::snapshot::DataSnapshot;
//!
//! fn pressed_codes(snap: &DataSnapshot) -> Vec<u16> {
//!     snap.iter()
//!         .filter(|(_, data)| data.is_pressed())
//!         .map(|(code, _)| *code)
//!         .collect()
//! }
//! ```

use crate::data::ElementData;
use crate::error::Result;
use crate::keycode::Keycode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Owned snapshot of merged records (`keycode → ElementData`), ordered by keycode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSnapshot(pub BTreeMap<Keycode, ElementData>);

impl DataSnapshot {
    #[inline]
    pub fn get(&self, code: Keycode) -> Option<&ElementData> {
        self.0.get(&code)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&Keycode, &ElementData)> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the snapshot and return the inner map.
    #[inline]
    pub fn into_inner(self) -> BTreeMap<Keycode, ElementData> {
        self.0
    }

    /// Pretty JSON dump, for logs and bug reports.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
