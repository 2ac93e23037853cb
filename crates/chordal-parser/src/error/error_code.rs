//! Error codes reported by the relation list parser.
//!
//! Codes are grouped by the stage that reports them:
//! - `E0xx` - string literal errors
//! - `E1xx` - syntax errors
//! - `E2xx` - value errors

use std::fmt;

/// Stable identifiers for parser diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A quoted identifier was opened but never closed on its line.
    E001,

    /// A quoted identifier contains an escape other than `\"` or `\\`.
    E002,

    /// Unexpected token.
    ///
    /// Something other than the next part of a relation was found.
    E100,

    /// Incomplete relation.
    ///
    /// The line ended before `source -> target : weight` was complete.
    E101,

    /// A relation weight is below zero.
    E200,

    /// A relation weight is infinite or not a number.
    E201,

    /// An identifier is empty or only whitespace.
    E202,

    /// The input holds no relations at all.
    E203,
}

impl ErrorCode {
    /// Returns the code as a string, e.g. `"E100"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
        }
    }

    /// Short description of the error class.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E002 => "invalid escape sequence",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete relation",
            ErrorCode::E200 => "negative weight",
            ErrorCode::E201 => "non-finite weight",
            ErrorCode::E202 => "empty identifier",
            ErrorCode::E203 => "empty relation list",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
