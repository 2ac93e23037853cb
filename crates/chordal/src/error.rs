//! Error types for Chordal operations.
//!
//! This module provides the main error type [`ChordError`] which wraps
//! the error conditions that can occur while building, styling and
//! rendering a chord diagram.

use std::io;

use thiserror::Error;

use chordal_core::{identifier::Id, semantic::DataError};
use chordal_parser::error::ParseError;

/// The main error type for Chordal operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the source text next to the structured
/// diagnostics so callers can render labelled snippets.
#[derive(Debug, Error)]
pub enum ChordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Invalid data: {0}")]
    InvalidData(#[from] DataError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Unknown entity `{0}`")]
    UnknownEntity(Id),

    #[error("Unknown relation: {0}")]
    UnknownRelation(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for ChordError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ChordError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
