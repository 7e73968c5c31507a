//! Error types for TOON encoding and decoding.
//!
//! Every decoding failure carries enough context to point at the offending
//! line: line numbers are 1-based, and messages name both the expected
//! construct and the observed token.
//!
//! ## Error Categories
//!
//! - **Lexical**: bad escapes, unterminated strings, malformed headers.
//!   These are fatal in every mode because the parser cannot advance past
//!   them deterministically.
//! - **Structural**: indentation, declared-length, and delimiter anomalies.
//!   Strict mode rejects them; lenient mode accepts the observed shape.
//! - **Expansion**: incompatible kinds meeting at the same dotted path.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{decode, Error, Value};
//!
//! let result: Result<Value, Error> = decode("items[2]:\n  - Apple");
//! assert!(matches!(result, Err(Error::LengthMismatch { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// All failure modes surfaced by the codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// A header line that cannot be parsed: missing colon, unbalanced
    /// `[`/`]` or `{`/`}`, or a non-numeric length.
    #[error("malformed header at line {line}: {msg}")]
    MalformedHeader { line: usize, msg: String },

    /// Leading spaces that are not a multiple of the configured indent, a
    /// nested line shallower than its parent, or tabs used as indentation.
    #[error("indentation error at line {line}: {msg}")]
    Indentation { line: usize, msg: String },

    /// A declared `[N]` that differs from the counted elements.
    #[error("length mismatch at line {line}: declared {declared}, found {found}")]
    LengthMismatch {
        line: usize,
        declared: usize,
        found: usize,
    },

    /// A row or field list using a delimiter other than the active one.
    #[error("delimiter mismatch at line {line}: expected {expected:?}, found {found:?}")]
    DelimiterMismatch {
        line: usize,
        expected: char,
        found: char,
    },

    /// An unknown escape sequence inside a quoted string.
    #[error("bad escape at line {line}: \\{escape}")]
    BadEscape { line: usize, escape: String },

    /// A quoted string with no closing quote on the same line.
    #[error("unterminated string at line {line}")]
    UnterminatedString { line: usize },

    /// The event stream ended in the middle of a value.
    #[error("incomplete event stream: {0}")]
    IncompleteStream(String),

    /// Path expansion met incompatible kinds under strict mode.
    #[error("expansion conflict at path {path} (object vs {kind})")]
    ExpansionConflict { path: String, kind: &'static str },

    /// An option that the chosen entry point does not support, such as
    /// `expand_paths` on the streaming decoders.
    #[error("unsupported option: {0}")]
    UnsupportedOption(String),

    /// Custom error raised through the serde bridge.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a malformed-header error for the given 1-based line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::Error;
    ///
    /// let err = Error::malformed_header(3, "missing ':'");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn malformed_header(line: usize, msg: impl Into<String>) -> Self {
        Error::MalformedHeader {
            line,
            msg: msg.into(),
        }
    }

    /// Creates an indentation error for the given 1-based line.
    pub fn indentation(line: usize, msg: impl Into<String>) -> Self {
        Error::Indentation {
            line,
            msg: msg.into(),
        }
    }

    /// Creates a length-mismatch error comparing a declared `[N]` against
    /// the counted elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::Error;
    ///
    /// let err = Error::length_mismatch(1, 2, 1);
    /// assert!(err.to_string().contains("declared 2"));
    /// ```
    pub fn length_mismatch(line: usize, declared: usize, found: usize) -> Self {
        Error::LengthMismatch {
            line,
            declared,
            found,
        }
    }

    /// Creates a delimiter-mismatch error.
    pub fn delimiter_mismatch(line: usize, expected: char, found: char) -> Self {
        Error::DelimiterMismatch {
            line,
            expected,
            found,
        }
    }

    /// Creates a bad-escape error for an unknown sequence such as `\x41`.
    pub fn bad_escape(line: usize, escape: impl Into<String>) -> Self {
        Error::BadEscape {
            line,
            escape: escape.into(),
        }
    }

    /// Creates an unterminated-string error.
    pub fn unterminated_string(line: usize) -> Self {
        Error::UnterminatedString { line }
    }

    /// Creates an incomplete-stream error describing what was still open.
    pub fn incomplete_stream(msg: impl Into<String>) -> Self {
        Error::IncompleteStream(msg.into())
    }

    /// Creates an expansion-conflict error at a dotted path.
    pub fn expansion_conflict(path: impl Into<String>, kind: &'static str) -> Self {
        Error::ExpansionConflict {
            path: path.into(),
            kind,
        }
    }

    /// Creates an unsupported-option error.
    pub fn unsupported_option(msg: impl Into<String>) -> Self {
        Error::UnsupportedOption(msg.into())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
