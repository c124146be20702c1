//! Reusable compiled patterns.
//!
//! A [`Selector`] owns a parsed [`Pattern`] and runs it against any number
//! of trees.
//!
//! # Example
//!
//! ```
//! use pathwalk::tree::loader::parse_json;
//! use pathwalk::Selector;
//!
//! let tree = parse_json(r#"{"pets": [{"name": "Tom"}, {"name": "Rex"}]}"#).unwrap();
//! let selector = Selector::new("$.pets[*].name").unwrap();
//!
//! let names: Vec<&str> = selector
//!     .find_all(&tree)
//!     .unwrap()
//!     .iter()
//!     .map(|m| m.node().id())
//!     .collect();
//! assert_eq!(names, vec!["Tom", "Rex"]);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::pattern::{Pattern, PatternError};
use crate::traversal::{Match, Traversal, TraversalError};
use crate::tree::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pattern: Pattern,
}

impl Selector {
    /// Parses `expression` into a selector.
    pub fn new(expression: &str) -> Result<Self, PatternError> {
        let pattern = Pattern::parse(expression)?;
        Ok(Self { pattern })
    }

    pub fn from_pattern(pattern: Pattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Starts a lazy search over `root`.
    pub fn find<'a, 'p>(&'p self, root: &'a Node) -> Traversal<'a, 'p> {
        Traversal::new(root, &self.pattern)
    }

    /// Returns the first match in depth-first order, if any.
    pub fn find_first<'a>(&self, root: &'a Node) -> Result<Option<Match<'a>>, TraversalError> {
        self.find(root).try_next()
    }

    /// Collects every match in depth-first order.
    pub fn find_all<'a>(&self, root: &'a Node) -> Result<Vec<Match<'a>>, TraversalError> {
        self.find(root).collect()
    }
}

impl From<Pattern> for Selector {
    fn from(pattern: Pattern) -> Self {
        Self::from_pattern(pattern)
    }
}

impl FromStr for Selector {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        Node::object(
            "root",
            [
                ("name", Node::leaf("Sergey").unwrap()),
                (
                    "langs",
                    Node::array("langs", [Node::leaf("ruby").unwrap(), Node::leaf("rust").unwrap()])
                        .unwrap(),
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_find_first() {
        let tree = tree();
        let selector = Selector::new("$.langs[*]").unwrap();
        let found = selector.find_first(&tree).unwrap().unwrap();
        assert_eq!(found.node().id(), "ruby");
        assert_eq!(found.path().to_string(), "$.langs[0]");
    }

    #[test]
    fn test_find_first_none() {
        let tree = tree();
        let selector: Selector = "$.missing".parse().unwrap();
        assert_eq!(selector.find_first(&tree), Ok(None));
    }

    #[test]
    fn test_find_all_outlives_selector() {
        let tree = tree();
        let found = Selector::new("$.*").unwrap().find_all(&tree).unwrap();
        let ids: Vec<&str> = found.iter().map(|m| m.node().id()).collect();
        assert_eq!(ids, vec!["Sergey", "langs"]);
    }

    #[test]
    fn test_invalid_expression() {
        assert!(Selector::new("name").is_err());
        assert_eq!(Selector::new(""), Err(PatternError::EmptyPattern));
    }

    #[test]
    fn test_display() {
        let selector = Selector::new("$ .langs [*]").unwrap();
        assert_eq!(selector.to_string(), "$.langs[*]");
    }
}
