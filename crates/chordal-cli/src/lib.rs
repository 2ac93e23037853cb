//! CLI logic for the Chordal chord diagram tool.
//!
//! Reads a relation list, loads configuration, renders the diagram and
//! writes the SVG, optionally opening it afterwards.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use config::{ConfigError, load_config};

use std::fs;

use log::info;

use chordal::{ChordDiagram, ChordError};

/// Run the Chordal CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ChordError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing and validation errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ChordError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing relations"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let diagram = ChordDiagram::from_source(&source, app_config)?;
    diagram.save(&args.output)?;
    info!(output_file = args.output; "SVG exported successfully");

    if args.open {
        let path = diagram.show()?;
        info!(path:? = path; "Opened diagram in viewer");
    }

    Ok(())
}
