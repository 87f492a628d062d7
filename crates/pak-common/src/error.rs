//! The error reported by every scanner and parser.

use thiserror::Error;

/// A fatal syntax error at a byte offset into the scanned input.
///
/// Scanners and parsers never recover: the first error aborts the whole
/// file and is propagated to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("offset {offset}: {message}")]
pub struct SyntaxError {
    /// Byte offset of the offending input.
    pub offset: usize,
    /// Human readable description.
    pub message: String,
}

impl SyntaxError {
    /// Create a new syntax error.
    #[must_use]
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }

    /// Shorthand for the error raised when input ends inside a construct.
    #[must_use]
    pub fn unexpected_eof(offset: usize) -> Self {
        Self::new(offset, "unexpected end of file")
    }
}

/// Convert a byte slice to text, reporting invalid UTF-8 as a syntax error
/// at the first invalid byte.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, SyntaxError> {
    std::str::from_utf8(bytes).map_err(|e| SyntaxError::new(e.valid_up_to(), "invalid utf-8"))
}
