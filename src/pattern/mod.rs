//! Path patterns and the steps they are matched against.
//!
//! A [`PathStep`] labels the edge from a node to its parent. A [`Pattern`] is
//! an ordered list of [`Criterion`]s; criterion *i* constrains the step at
//! depth *i*, the root being depth 0.
//!
//! # Supported Syntax
//!
//! - `$` - Root node
//! - `.name` or `['name']` - Named child
//! - `.*` - Any named child
//! - `[*]` - Any array element
//! - `[3]` - Array element by index (accepted, never matches)
//!
//! # Examples
//!
//! ```
//! // $.user.name - the user's name
//! // $.user.* - every field of the user
//! // $.pets[*].name - the name of every pet
//! ```

pub mod criterion;
pub mod error;
pub mod parser;
pub mod step;

pub use criterion::{matches, Criterion, Pattern};
pub use error::PatternError;
pub use parser::Parser;
pub use step::{Path, PathStep};
