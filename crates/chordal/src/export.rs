//! Export functionality for chord diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing a laid-out diagram to an output format. It is the final stage in
//! the Chordal processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Relations
//!     ↓ validate
//! Dataset
//!     ↓ layout
//! Positioned Elements (ChordLayout)
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`ChordError::Export`] at the crate
//! boundary.
//!
//! [`ChordError::Export`]: crate::ChordError::Export

/// SVG export backend.
pub mod svg;

use crate::layout::ChordLayout;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Exports a computed layout to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_layout(&mut self, layout: &ChordLayout) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
