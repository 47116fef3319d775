//! Layout loading.
//!
//! Walks the descriptor chain of a layout document, builds the elements in
//! chain order (which is also draw order) and allocates one idle
//! [`ElementData`] record per distinct keycode.

use crate::config::ConfigSource;
use crate::data::ElementData;
use crate::element::{self, Element};
use crate::error::{OverlayError, Result};
use crate::keycode::Keycode;
use std::collections::{HashMap, HashSet};

pub const KEY_WIDTH: &str = "overlay_width";
pub const KEY_HEIGHT: &str = "overlay_height";
pub const KEY_FIRST_ID: &str = "first_element";
pub const KEY_DEBUG: &str = "debug";
/// Suffix of the per-descriptor key naming the next descriptor.
pub const NEXT_SUFFIX: &str = "_next";

/// Result of a successful (possibly degraded) layout load.
#[derive(Debug, Default)]
pub struct Layout {
    /// Declared overlay size; `0` when the document doesn't set it.
    pub width: u32,
    pub height: u32,
    pub debug: bool,
    pub elements: Vec<Box<dyn Element>>,
    pub data: HashMap<Keycode, ElementData>,
}

/// Load every element of `cfg`.
///
/// Fatal document errors and descriptor cycles fail the whole load. Non-fatal
/// errors are logged and the elements that could be read are kept.
pub fn load(cfg: &mut dyn ConfigSource, name: &str) -> Result<Layout> {
    if cfg.has_fatal_errors() {
        log::warn!("{}", cfg.error_message());
        return Err(OverlayError::FatalLayout(cfg.error_message()));
    }

    let width = read_size(cfg, KEY_WIDTH);
    let height = read_size(cfg, KEY_HEIGHT);
    let mut id = cfg.get_string(KEY_FIRST_ID, false);
    let debug = cfg.get_bool(KEY_DEBUG, true) || cfg!(feature = "debug-log");

    if debug {
        log::info!("Started loading of {name}");
    }

    let mut seen = HashSet::new();
    let mut elements = Vec::new();
    while !id.is_empty() {
        if !seen.insert(id.clone()) {
            return Err(OverlayError::DescriptorCycle(id));
        }
        if let Some(element) = element::from_config(cfg, &id, debug) {
            elements.push(element);
        }
        id = cfg.get_string(&format!("{id}{NEXT_SUFFIX}"), true);
    }

    if cfg.has_errors() {
        log::warn!("{name}: {}", cfg.error_message());
        if cfg.has_fatal_errors() {
            return Err(OverlayError::FatalLayout(cfg.error_message()));
        }
    }

    let data = allocate_data(&elements);
    Ok(Layout {
        width,
        height,
        debug,
        elements,
        data,
    })
}

/// One idle record per distinct keycode; the first element seen for a code
/// decides the record's variant.
pub fn allocate_data(elements: &[Box<dyn Element>]) -> HashMap<Keycode, ElementData> {
    let mut data = HashMap::new();
    for element in elements {
        data.entry(element.keycode())
            .or_insert_with(|| ElementData::idle(element.kind()));
    }
    data
}

fn read_size(cfg: &mut dyn ConfigSource, key: &str) -> u32 {
    u32::try_from(cfg.get_int(key, true)).unwrap_or(0)
}
