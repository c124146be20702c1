//! Node representation for searchable trees.
//!
//! Every node carries a non-empty identifier and one of three child shapes:
//! none (a leaf), an ordered sequence (an array) or an insertion-ordered
//! mapping (an object). Nodes are immutable once built. Children are held
//! behind [`Arc`] so one subtree can be shared by several parents and a tree
//! can be searched from several threads at once.
//!
//! # Example
//!
//! ```
//! use pathwalk::tree::{Node, NodeKind};
//!
//! let name = Node::leaf("Sergey").unwrap();
//! let age = Node::leaf("27").unwrap();
//! let user = Node::object("user", [("name", name), ("age", age)]).unwrap();
//!
//! assert_eq!(user.id(), "user");
//! assert_eq!(user.kind(), NodeKind::Object);
//! assert_eq!(user.len(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::error::NodeError;

/// The three node shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Terminal node without children.
    Leaf,
    /// Children addressed by position.
    Array,
    /// Children addressed by key, in insertion order.
    Object,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Leaf => write!(f, "leaf"),
            NodeKind::Array => write!(f, "array"),
            NodeKind::Object => write!(f, "object"),
        }
    }
}

/// Child collection of a node.
///
/// Passed to [`Node::build`] and returned by [`Node::children`]. The variant
/// must agree with the node kind: leaves take `None`, arrays a `Sequence`,
/// objects a `Mapping`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Children {
    #[default]
    None,
    Sequence(Vec<Arc<Node>>),
    Mapping(IndexMap<String, Arc<Node>>),
}

impl Children {
    /// Human readable name of the collection shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Children::None => "no children",
            Children::Sequence(_) => "a sequence",
            Children::Mapping(_) => "a mapping",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Children::None => 0,
            Children::Sequence(items) => items.len(),
            Children::Mapping(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An immutable tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    children: Children,
}

impl Node {
    /// Builds a node of the given kind, checking the identifier and the
    /// shape of `children`.
    ///
    /// # Errors
    ///
    /// - [`NodeError::EmptyId`] if `id` is empty
    /// - [`NodeError::ShapeMismatch`] if `children` does not fit `kind`
    ///
    /// # Example
    ///
    /// ```
    /// use pathwalk::tree::{Children, Node, NodeError, NodeKind};
    ///
    /// let leaf = Node::build(NodeKind::Leaf, "cat", Children::None).unwrap();
    /// assert!(leaf.is_leaf());
    ///
    /// let err = Node::build(NodeKind::Array, "pets", Children::None).unwrap_err();
    /// assert!(matches!(err, NodeError::ShapeMismatch { .. }));
    /// ```
    pub fn build(
        kind: NodeKind,
        id: impl Into<String>,
        children: Children,
    ) -> Result<Self, NodeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(NodeError::EmptyId);
        }

        let expected = match kind {
            NodeKind::Leaf => "no children",
            NodeKind::Array => "a sequence",
            NodeKind::Object => "a mapping",
        };
        let fits = matches!(
            (kind, &children),
            (NodeKind::Leaf, Children::None)
                | (NodeKind::Array, Children::Sequence(_))
                | (NodeKind::Object, Children::Mapping(_))
        );
        if !fits {
            return Err(NodeError::ShapeMismatch {
                kind,
                expected,
                found: children.shape(),
            });
        }

        Ok(Self { id, children })
    }

    /// Creates a leaf node.
    pub fn leaf(id: impl Into<String>) -> Result<Self, NodeError> {
        Self::build(NodeKind::Leaf, id, Children::None)
    }

    /// Creates an array node from its children in index order.
    ///
    /// Children may be plain nodes or `Arc`s of nodes already shared with
    /// another parent.
    pub fn array<I, C>(id: impl Into<String>, children: I) -> Result<Self, NodeError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Arc<Node>>,
    {
        let items = children.into_iter().map(Into::into).collect();
        Self::build(NodeKind::Array, id, Children::Sequence(items))
    }

    /// Creates an object node. Entry order is kept as given; a repeated key
    /// replaces the earlier value but keeps its original position.
    pub fn object<I, K, C>(id: impl Into<String>, children: I) -> Result<Self, NodeError>
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: Into<Arc<Node>>,
    {
        let entries = children
            .into_iter()
            .map(|(key, child)| (key.into(), child.into()))
            .collect();
        Self::build(NodeKind::Object, id, Children::Mapping(entries))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the node kind, derived from the child collection.
    pub fn kind(&self) -> NodeKind {
        match self.children {
            Children::None => NodeKind::Leaf,
            Children::Sequence(_) => NodeKind::Array,
            Children::Mapping(_) => NodeKind::Object,
        }
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    /// Number of direct children. Always zero for leaves.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.children, Children::None)
    }

    /// Looks up a direct child of an object node by key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match &self.children {
            Children::Mapping(entries) => entries.get(key).map(Arc::as_ref),
            _ => None,
        }
    }

    /// Looks up a direct child of an array node by position.
    pub fn get_index(&self, index: usize) -> Option<&Node> {
        match &self.children {
            Children::Sequence(items) => items.get(index).map(Arc::as_ref),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Frees nested children iteratively so tree depth is bounded by the heap,
/// not by the call stack. Children still referenced elsewhere are left alone.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Arc<Node>> = match std::mem::take(&mut self.children) {
            Children::None => return,
            Children::Sequence(items) => items,
            Children::Mapping(entries) => entries.into_values().collect(),
        };

        while let Some(child) = pending.pop() {
            if let Ok(mut node) = Arc::try_unwrap(child) {
                match std::mem::take(&mut node.children) {
                    Children::None => {}
                    Children::Sequence(items) => pending.extend(items),
                    Children::Mapping(entries) => pending.extend(entries.into_values()),
                }
            }
        }
    }
}
