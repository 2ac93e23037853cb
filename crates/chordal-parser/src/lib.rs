//! Parser for Chordal relation lists.
//!
//! A relation list is plain text with one weighted, directed relation per
//! line:
//!
//! ```text
//! # source -> target : weight
//! kitchen -> garden : 4
//! "living room" -> kitchen : 2.5
//! ```
//!
//! [`parse`] turns such text into [`Relation`]s, or into a [`ParseError`]
//! listing every problem with its source [`Span`].
//!
//! # Example
//!
//! ```
//! use chordal_parser::parse;
//!
//! let relations = parse("a -> b : 2\nb -> c : 1").unwrap();
//! assert_eq!(relations.len(), 2);
//!
//! let err = parse("a -> b : -1").unwrap_err();
//! assert_eq!(err.to_string(), "error[E200]: negative weight `-1`");
//! ```

pub mod error;
mod parser;
mod span;
mod validate;

use log::debug;

use chordal_core::semantic::Relation;

pub use span::{Span, Spanned};

use error::{DiagnosticCollector, ParseError};

/// Parses a relation list.
///
/// Syntax errors, empty identifiers, negative or non-finite weights and an
/// input without relations are all reported together.
///
/// # Errors
///
/// Returns a [`ParseError`] holding one diagnostic per problem found.
pub fn parse(source: &str) -> Result<Vec<Relation>, ParseError> {
    let mut collector = DiagnosticCollector::new();

    let declarations = parser::parse_relations(source, &mut collector);
    validate::check_relations(&declarations, &mut collector);
    if declarations.is_empty() && !collector.has_errors() {
        collector.emit(validate::empty_input(source));
    }
    collector.finish()?;

    let relations: Vec<Relation> = declarations
        .into_iter()
        .map(|declaration| declaration.into_relation())
        .collect();
    debug!(relations = relations.len(); "Parsed relation list");

    Ok(relations)
}
