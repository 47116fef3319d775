//! Error types.
//!
//! Nothing in this crate is fatal to the host. [`Overlay`](crate::overlay::Overlay)
//! turns every [`OverlayError`] into `is_loaded() == false` plus a log line; the
//! variants exist so the individual load steps can use `?`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image error on {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture upload failed: {0}")]
    Upload(String),

    /// A required path in the settings is empty.
    #[error("No {0} configured")]
    MissingPath(&'static str),

    /// The layout document is unusable as a whole.
    #[error("Fatal layout error: {0}")]
    FatalLayout(String),

    /// The descriptor chain revisits an id and would never terminate.
    #[error("Element chain loops back to '{0}'")]
    DescriptorCycle(String),

    #[error("Couldn't start capture thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Settings parse error: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("Settings encode error: {0}")]
    SettingsEncode(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OverlayError>;
