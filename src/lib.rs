//! Lazy, resumable path-pattern search over heterogeneous trees.
//!
//! Trees are made of string leaves, ordered arrays and ordered key-value
//! objects ([`tree::Node`]). A [`pattern::Pattern`] lists one criterion per
//! depth: the root, a literal key, any key, or any array index. A
//! [`traversal::Traversal`] walks the tree depth-first with an explicit
//! stack and hands back one [`traversal::Match`] per call, resuming where
//! the previous call stopped.
//!
//! # Example
//!
//! ```
//! use pathwalk::pattern::Pattern;
//! use pathwalk::traversal::Traversal;
//! use pathwalk::tree::Node;
//!
//! let pet = |kind: &str, name: &str| {
//!     Node::object(
//!         format!("{}(obj)", name),
//!         [("type", Node::leaf(kind).unwrap()), ("name", Node::leaf(name).unwrap())],
//!     )
//!     .unwrap()
//! };
//! let pets = Node::array("pets", [pet("cat", "Tom"), pet("dog", "Rex")]).unwrap();
//! let root = Node::object("root", [("pets", pets)]).unwrap();
//!
//! let pattern = Pattern::parse("$.pets[*].name").unwrap();
//! let names: Vec<&str> = Traversal::new(&root, &pattern)
//!     .map(|found| found.unwrap().node().id())
//!     .collect();
//! assert_eq!(names, vec!["Tom", "Rex"]);
//! ```

pub mod config;
pub mod pattern;
pub mod selector;
pub mod traversal;
pub mod tree;

pub use pattern::{Criterion, Path, PathStep, Pattern, PatternError};
pub use selector::Selector;
pub use traversal::{Match, Traversal, TraversalError};
pub use tree::{Node, NodeError};
