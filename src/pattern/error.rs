//! Error types for pattern construction and parsing.

/// Errors that can occur while building or parsing a pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// A pattern must contain at least one criterion.
    #[error("pattern must contain at least one criterion")]
    EmptyPattern,
    /// Unexpected token at a specific position.
    #[error("unexpected token '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },
    /// Unexpected end of input.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },
    /// Invalid syntax with description.
    #[error("invalid pattern syntax: {message}")]
    InvalidSyntax { message: String },
}
