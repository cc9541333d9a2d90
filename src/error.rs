//! Error types for scene loading and vector math.

use std::path::PathBuf;

use thiserror::Error;

use crate::object::ObjectKind;

/// A vector too short to be normalized.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("cannot normalize a vector of length {length}")]
pub struct DegenerateVector {
    /// Length of the rejected vector.
    pub length: f64,
}

/// Errors raised while reading a scene description.
///
/// Every variant carries the 1-based line the reader was on when it gave up.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Input ended where another character was required.
    #[error("unexpected end of file on line {line}")]
    UnexpectedEof { line: usize },

    /// A structural character or token did not match.
    #[error("expected {expected} on line {line}, found {found}")]
    Syntax {
        expected: &'static str,
        found: String,
        line: usize,
    },

    /// A string ran past the 128 byte limit.
    #[error("string longer than 128 bytes on line {line}")]
    StringTooLong { line: usize },

    /// A string held an escape or a byte outside printable ASCII.
    #[error("unsupported string content {found} on line {line}")]
    UnsupportedStringContent { found: String, line: usize },

    /// A numeric literal that does not form a finite number.
    #[error("invalid number \"{text}\" on line {line}")]
    InvalidNumber { text: String, line: usize },

    #[error("unknown object type \"{value}\" on line {line}")]
    UnknownObjectType { value: String, line: usize },

    #[error("unknown field \"{key}\" on line {line}")]
    UnknownField { key: String, line: usize },

    /// A known field used on an object type that has no such property.
    #[error("field \"{key}\" does not apply to a {kind} on line {line}")]
    FieldNotApplicable {
        key: String,
        kind: ObjectKind,
        line: usize,
    },

    /// An object closed without one of its required fields.
    #[error("{kind} is missing \"{field}\" on line {line}")]
    MissingField {
        field: &'static str,
        kind: ObjectKind,
        line: usize,
    },

    /// A field value outside its allowed range.
    #[error("invalid \"{field}\" on line {line}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
        line: usize,
    },

    #[error("degenerate \"{field}\" vector on line {line}")]
    DegenerateVector { field: &'static str, line: usize },

    #[error("second camera on line {line}, a scene has exactly one")]
    DuplicateCamera { line: usize },

    /// The scene declares objects but no camera to view them with.
    #[error("scene has no camera (reached line {line})")]
    MissingCamera { line: usize },
}

impl ParseError {
    /// Line the error was reported on.
    pub fn line(&self) -> usize {
        match self {
            Self::UnexpectedEof { line }
            | Self::Syntax { line, .. }
            | Self::StringTooLong { line }
            | Self::UnsupportedStringContent { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::UnknownObjectType { line, .. }
            | Self::UnknownField { line, .. }
            | Self::FieldNotApplicable { line, .. }
            | Self::MissingField { line, .. }
            | Self::InvalidValue { line, .. }
            | Self::DegenerateVector { line, .. }
            | Self::DuplicateCamera { line }
            | Self::MissingCamera { line } => *line,
        }
    }
}

/// Errors from [`crate::scene::load`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read scene file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse scene file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}
