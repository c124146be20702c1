//! Heterogeneous trees searched by pathwalk.
//!
//! A tree is built from three node shapes: string leaves, ordered arrays and
//! ordered key-value objects. Trees can be assembled by hand through the
//! constructors on [`Node`] or converted from JSON and YAML documents with the
//! [`loader`] functions.

pub mod error;
pub mod loader;
pub mod node;

pub use error::NodeError;
pub use node::{Children, Node, NodeKind};
