//! Error types for tree construction.

use super::node::NodeKind;

/// Errors raised when a [`Node`](super::Node) is built from invalid parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    /// The identifier was an empty string.
    #[error("node id must be a non-empty string")]
    EmptyId,
    /// The children collection does not fit the requested node kind.
    #[error("children of {kind} node must be {expected}, got {found}")]
    ShapeMismatch {
        kind: NodeKind,
        expected: &'static str,
        found: &'static str,
    },
}
