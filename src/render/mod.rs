//! Output writers for calculated land patterns.
//!
//! Every writer implements [`RenderTarget`] and receives the primitives in
//! the order the calculator produced them, so output is reproducible.
//!
//! - [`kicad`] — `KiCad` `.kicad_mod` S-expression footprint
//! - [`raster`] — PNG preview image
//! - [`json`] — JSON dump of the land pattern

pub mod json;
pub mod kicad;
pub mod raster;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ipc7351::packages::LandPattern;
use crate::ipc7351::primitives::{Circle, Line, Pad};

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while producing output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Failed to write the output file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The image canvas would be empty.
    #[error("Invalid canvas size {width}x{height}")]
    CanvasSize {
        /// Canvas width in pixels.
        width: u32,
        /// Canvas height in pixels.
        height: u32,
    },

    /// Image encoding failed.
    #[error("Image encoding error: {message}")]
    Encode {
        /// Description of what went wrong.
        message: String,
    },

    /// JSON serialisation failed.
    #[error("JSON serialisation error")]
    Json {
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl RenderError {
    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates an encoding error.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }
}

/// A consumer of footprint primitives.
pub trait RenderTarget {
    /// Draws a stroked line.
    fn line(&mut self, line: &Line);

    /// Draws a stroked circle.
    fn circle(&mut self, circle: &Circle);

    /// Draws a filled pad.
    fn pad(&mut self, pad: &Pad);
}

/// Feeds every primitive of `pattern` to `target`, in order.
pub fn render_all<T: RenderTarget + ?Sized>(pattern: &LandPattern, target: &mut T) {
    for primitive in &pattern.primitives {
        primitive.render_to(target);
    }
}

/// Writes rendered bytes to `path`.
///
/// # Errors
///
/// Returns [`RenderError::FileWrite`] if the file cannot be created or written.
pub fn write_output(path: impl Into<PathBuf>, contents: &[u8]) -> RenderResult<()> {
    let path = path.into();
    std::fs::write(&path, contents).map_err(|e| RenderError::file_write(path, e))
}
