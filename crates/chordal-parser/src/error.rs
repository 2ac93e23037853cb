//! Diagnostics reported while reading a relation list.
//!
//! Every problem found in the input becomes a [`Diagnostic`] carrying an
//! [`ErrorCode`], one or more labelled [`Span`](crate::Span)s and an optional
//! help line. Parsing keeps going after a bad line, so a single
//! [`ParseError`] can hold several diagnostics.
//!
//! # Example
//!
//! ```
//! # use chordal_parser::error::{Diagnostic, ErrorCode};
//! # use chordal_parser::Span;
//!
//! let diag = Diagnostic::error("negative weight `-2`")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(11..13), "weight is below zero")
//!     .with_help("weights must be zero or positive");
//!
//! assert_eq!(diag.to_string(), "error[E200]: negative weight `-2`");
//! ```

mod diagnostic;
mod error_code;
mod parse_error;

pub(crate) use parse_error::DiagnosticCollector;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
