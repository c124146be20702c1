//! Criteria, step matching and patterns.

use std::fmt;
use std::str::FromStr;

use super::error::PatternError;
use super::parser::Parser;
use super::step::{write_key, PathStep};

/// Which path steps are acceptable at one depth of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Criterion {
    /// Root node ($)
    Root,
    /// Named child (.name or ['name'])
    Key(String),
    /// Any named child (.*)
    AnyKey,
    /// Array element at a fixed position ([3]); never satisfied, see [`matches`]
    Index(usize),
    /// Any array element ([*])
    AnyIndex,
}

impl Criterion {
    /// Convenience constructor for [`Criterion::Key`].
    pub fn key(name: impl Into<String>) -> Self {
        Criterion::Key(name.into())
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Root => write!(f, "$"),
            Criterion::Key(name) => write_key(f, name),
            Criterion::AnyKey => write!(f, ".*"),
            Criterion::Index(index) => write!(f, "[{}]", index),
            Criterion::AnyIndex => write!(f, "[*]"),
        }
    }
}

/// Tests a single step against a single criterion.
///
/// `Index` steps are only ever accepted by `AnyIndex`; a literal
/// `Criterion::Index(n)` matches nothing, not even `PathStep::Index(n)`.
///
/// # Example
///
/// ```
/// use pathwalk::pattern::{matches, Criterion, PathStep};
///
/// assert!(matches(&PathStep::Key("name"), &Criterion::AnyKey));
/// assert!(matches(&PathStep::Index(0), &Criterion::AnyIndex));
/// assert!(!matches(&PathStep::Index(0), &Criterion::Index(0)));
/// ```
pub fn matches(step: &PathStep<'_>, criterion: &Criterion) -> bool {
    match (step, criterion) {
        (PathStep::Root, Criterion::Root) => true,
        (PathStep::Key(key), Criterion::Key(name)) => *key == name.as_str(),
        (PathStep::Key(_), Criterion::AnyKey) => true,
        (PathStep::Index(_), Criterion::AnyIndex) => true,
        // TODO: decide whether literal index criteria should match PathStep::Index(n)
        (PathStep::Index(_), Criterion::Index(_)) => false,
        (PathStep::Root, _) | (PathStep::Key(_), _) | (PathStep::Index(_), _) => false,
    }
}

/// A non-empty, ordered sequence of criteria.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    criteria: Vec<Criterion>,
}

impl Pattern {
    /// Creates a pattern from its criteria.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::EmptyPattern`] if `criteria` is empty.
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, PatternError> {
        if criteria.is_empty() {
            return Err(PatternError::EmptyPattern);
        }
        Ok(Self { criteria })
    }

    /// Parses a pattern from its textual form, e.g. `$.pets[*].name`.
    pub fn parse(expression: &str) -> Result<Self, PatternError> {
        Parser::parse(expression)
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Index of the final criterion. A node matched at this depth is a full
    /// match.
    pub fn last_index(&self) -> usize {
        self.criteria.len() - 1
    }

    pub fn get(&self, depth: usize) -> Option<&Criterion> {
        self.criteria.get(depth)
    }

    /// Returns true if `steps` has one step per criterion and every step
    /// matches the criterion at the same depth.
    pub fn is_satisfied_by(&self, steps: &[PathStep<'_>]) -> bool {
        steps.len() == self.criteria.len()
            && steps
                .iter()
                .zip(&self.criteria)
                .all(|(step, criterion)| matches(step, criterion))
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

impl TryFrom<Vec<Criterion>> for Pattern {
    type Error = PatternError;

    fn try_from(criteria: Vec<Criterion>) -> Result<Self, Self::Error> {
        Pattern::new(criteria)
    }
}

/// Renders the criteria in pattern syntax. The text parses back to an equal
/// pattern only when the first criterion is [`Criterion::Root`]; the parser
/// requires a leading `$`.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for criterion in &self.criteria {
            write!(f, "{}", criterion)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_table() {
        assert!(matches(&PathStep::Root, &Criterion::Root));
        assert!(matches(&PathStep::Key("a"), &Criterion::key("a")));
        assert!(!matches(&PathStep::Key("a"), &Criterion::key("b")));
        assert!(matches(&PathStep::Key("a"), &Criterion::AnyKey));
        assert!(matches(&PathStep::Index(7), &Criterion::AnyIndex));
    }

    #[test]
    fn test_matches_rejects_cross_kinds() {
        assert!(!matches(&PathStep::Root, &Criterion::AnyKey));
        assert!(!matches(&PathStep::Root, &Criterion::AnyIndex));
        assert!(!matches(&PathStep::Key("a"), &Criterion::Root));
        assert!(!matches(&PathStep::Key("a"), &Criterion::AnyIndex));
        assert!(!matches(&PathStep::Key("0"), &Criterion::Index(0)));
        assert!(!matches(&PathStep::Index(0), &Criterion::Root));
        assert!(!matches(&PathStep::Index(0), &Criterion::AnyKey));
        assert!(!matches(&PathStep::Index(0), &Criterion::key("0")));
    }

    #[test]
    fn test_literal_index_never_matches() {
        for n in 0..4 {
            assert!(!matches(&PathStep::Index(n), &Criterion::Index(n)));
        }
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert_eq!(Pattern::new(vec![]), Err(PatternError::EmptyPattern));
    }

    #[test]
    fn test_pattern_accessors() {
        let pattern = Pattern::new(vec![Criterion::Root, Criterion::key("user")]).unwrap();
        assert_eq!(pattern.len(), 2);
        assert_eq!(pattern.last_index(), 1);
        assert_eq!(pattern.get(1), Some(&Criterion::key("user")));
        assert_eq!(pattern.get(2), None);
        assert!(!pattern.is_empty());
    }

    #[test]
    fn test_is_satisfied_by() {
        let pattern: Pattern = vec![Criterion::Root, Criterion::AnyKey, Criterion::AnyIndex]
            .try_into()
            .unwrap();
        assert!(pattern.is_satisfied_by(&[
            PathStep::Root,
            PathStep::Key("pets"),
            PathStep::Index(0),
        ]));
        assert!(!pattern.is_satisfied_by(&[PathStep::Root, PathStep::Key("pets")]));
        assert!(!pattern.is_satisfied_by(&[
            PathStep::Root,
            PathStep::Index(0),
            PathStep::Index(0),
        ]));
    }

    #[test]
    fn test_display() {
        let pattern = Pattern::new(vec![
            Criterion::Root,
            Criterion::key("pets"),
            Criterion::AnyIndex,
            Criterion::key("nick name"),
            Criterion::AnyKey,
            Criterion::Index(2),
        ])
        .unwrap();
        assert_eq!(pattern.to_string(), "$.pets[*]['nick name'].*[2]");
    }

    #[test]
    fn test_display_parses_back_only_from_root() {
        let rooted = Pattern::new(vec![Criterion::Root, Criterion::AnyKey, Criterion::AnyIndex])
            .unwrap();
        assert_eq!(Pattern::parse(&rooted.to_string()), Ok(rooted));

        let unrooted = Pattern::new(vec![Criterion::AnyKey, Criterion::AnyIndex]).unwrap();
        assert_eq!(unrooted.to_string(), ".*[*]");
        assert!(Pattern::parse(&unrooted.to_string()).is_err());
    }
}
