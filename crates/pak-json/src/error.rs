//! Errors raised while reading JSON assets.

use pak_common::SyntaxError;
use thiserror::Error;

/// Failure to read an import map or web manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
    /// The text is not JSON.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The JSON does not have the expected shape.
    #[error("{path}: {message}")]
    Shape {
        /// JSON path of the offending value, such as `$.imports["lodash"]`.
        path: String,
        /// What was expected there.
        message: String,
    },
}

impl JsonError {
    pub(crate) fn shape(path: &JsonPath, message: impl Into<String>) -> Self {
        Self::Shape {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Convert a `serde_json` syntax error, which reports a line and column,
/// into a [`SyntaxError`] at a byte offset into `text`.
#[must_use]
pub fn syntax_error(text: &str, error: &serde_json::Error) -> SyntaxError {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(error.line().saturating_sub(1))
        .map(str::len)
        .sum();
    let offset = (line_start + error.column().saturating_sub(1)).min(text.len());

    let message = error.to_string();
    let message = message
        .rsplit_once(" at line ")
        .map_or(message.as_str(), |(message, _)| message);
    SyntaxError::new(offset, message)
}

/// A JSON path, written `$`, `$.imports`, `$.scopes["/a/"][0]`.
#[derive(Debug, Clone, Default)]
pub struct JsonPath(Vec<Segment>);

#[derive(Debug, Clone)]
enum Segment {
    Key(String),
    Index(usize),
}

impl JsonPath {
    /// The path of the document root.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// The path of member `key` of this value.
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key.to_string()));
        Self(segments)
    }

    /// The path of element `index` of this value.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Self(segments)
    }
}

impl std::fmt::Display for JsonPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                Segment::Key(key) if is_plain_key(key) => write!(f, ".{key}")?,
                Segment::Key(key) => write!(f, "[{key:?}]")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
