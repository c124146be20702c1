//! Lazy depth-first search for nodes matching a [`Pattern`](crate::pattern::Pattern).
//!
//! [`Traversal`] simulates a recursive descent with an explicit stack of
//! frames, each holding a [`ChildCursor`]. Each call to
//! [`Traversal::try_next`] resumes from the state the previous call left
//! behind, so matches are produced one at a time and tree depth is bounded
//! by heap rather than call stack.
//!
//! Frames are internal to the engine:
//!
//! ```compile_fail
//! use pathwalk::traversal::engine::Frame;
//! ```

pub mod cursor;
pub mod engine;

pub use cursor::ChildCursor;
pub use engine::{Match, Traversal, TraversalError};
