//! Error types for descriptor loading.
//!
//! Every failure of a load attempt is terminal for that attempt and is
//! reported exactly once through the observer; none of them roll back a
//! previously loaded descriptor, and none are retried internally. Retry is
//! an explicit future `ensure_loaded` call.

use thiserror::Error;

/// Errors produced while parsing a TileJSON document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The document is not well-formed JSON.
    ///
    /// `offset` is the byte offset of the failure in the input document;
    /// `message` is the decoder's diagnostic, verbatim.
    #[error("invalid JSON at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// The document is well-formed JSON but does not decode into a
    /// descriptor (missing `tiles`, wrong field type, ...).
    #[error("invalid TileJSON: {message}")]
    Schema { message: String },
}

/// Errors reported through [`SourceObserver::on_source_error`].
///
/// [`SourceObserver::on_source_error`]: super::SourceObserver::on_source_error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The fetch itself failed (network, cache, HTTP status).
    #[error("request failed: {0}")]
    Transport(String),

    /// The fetch succeeded but the response carried no usable payload.
    #[error("unexpectedly empty TileJSON response")]
    EmptyBody,

    /// The fetched document could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = ParseError::Syntax {
            offset: 9,
            message: "EOF while parsing a list at line 1 column 10".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid JSON at offset 9: EOF while parsing a list at line 1 column 10"
        );
    }

    #[test]
    fn test_schema_error_display() {
        let err = ParseError::Schema {
            message: "missing field `tiles`".to_string(),
        };
        assert_eq!(err.to_string(), "invalid TileJSON: missing field `tiles`");
    }

    #[test]
    fn test_parse_error_converts_into_source_error() {
        let parse = ParseError::Schema {
            message: "missing field `tiles`".to_string(),
        };
        let source = SourceError::from(parse.clone());
        assert_eq!(source, SourceError::Parse(parse));
        assert_eq!(source.to_string(), "invalid TileJSON: missing field `tiles`");
    }

    #[test]
    fn test_empty_body_display() {
        assert_eq!(
            SourceError::EmptyBody.to_string(),
            "unexpectedly empty TileJSON response"
        );
    }
}
