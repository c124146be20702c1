//! Edge labels and root-to-node paths.

use std::fmt;

/// How a node was reached from its parent.
///
/// Keys borrow from the tree being searched, so steps are cheap to produce
/// and to collect into a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStep<'a> {
    /// The root node has no parent.
    Root,
    /// Reached through an object key.
    Key(&'a str),
    /// Reached through an array position.
    Index(usize),
}

impl fmt::Display for PathStep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Root => write!(f, "$"),
            PathStep::Key(key) => write_key(f, key),
            PathStep::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Writes `.key` for plain identifiers and `['key']` for everything else.
pub(crate) fn write_key(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
    if is_plain_identifier(key) {
        write!(f, ".{}", key)
    } else {
        write!(f, "['")?;
        for ch in key.chars() {
            match ch {
                '\'' => write!(f, "\\'")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\t' => write!(f, "\\t")?,
                '\r' => write!(f, "\\r")?,
                c => write!(f, "{}", c)?,
            }
        }
        write!(f, "']")
    }
}

/// Same character set the pattern parser accepts after a dot.
pub(crate) fn is_plain_identifier(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '-')
}

/// The ordered steps from the root to a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path<'a> {
    steps: Vec<PathStep<'a>>,
}

impl<'a> Path<'a> {
    pub fn new(steps: Vec<PathStep<'a>>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep<'a>] {
        &self.steps
    }

    /// Number of steps, including the root step.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&PathStep<'a>> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathStep<'a>> {
        self.steps.iter()
    }

    pub fn into_steps(self) -> Vec<PathStep<'a>> {
        self.steps
    }
}

impl<'a> FromIterator<PathStep<'a>> for Path<'a> {
    fn from_iter<I: IntoIterator<Item = PathStep<'a>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, 'p> IntoIterator for &'p Path<'a> {
    type Item = &'p PathStep<'a>;
    type IntoIter = std::slice::Iter<'p, PathStep<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl fmt::Display for Path<'_> {
    /// Renders the path in pattern syntax, e.g. `$.pets[1].name`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}
