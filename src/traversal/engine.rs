use std::iter::{self, FusedIterator};

use tracing::{debug, trace};

use super::cursor::ChildCursor;
use crate::pattern::{matches, Path, PathStep, Pattern};
use crate::tree::Node;

/// Errors that abort a traversal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraversalError {
    /// The engine reached a state with no defined transition. This is a bug
    /// in the engine, not in the tree or pattern.
    #[error(
        "traversal invariant violated (depth {depth}, stack {stack_len}, pattern length {pattern_len})"
    )]
    InvariantViolation {
        depth: usize,
        stack_len: usize,
        pattern_len: usize,
    },
}

/// One open node on the search stack: its child cursor plus the step that
/// led to it. Frames move between `current` and the stack; the cursor is
/// never rebuilt.
#[derive(Debug)]
struct Frame<'a> {
    cursor: ChildCursor<'a>,
    node: &'a Node,
    step: PathStep<'a>,
}

impl<'a> Frame<'a> {
    fn new(node: &'a Node, step: PathStep<'a>) -> Self {
        Self {
            cursor: ChildCursor::new(node),
            node,
            step,
        }
    }
}

/// A node whose root-to-node path satisfies the pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    node: &'a Node,
    path: Path<'a>,
}

impl<'a> Match<'a> {
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn path(&self) -> &Path<'a> {
        &self.path
    }

    pub fn steps(&self) -> &[PathStep<'a>] {
        self.path.steps()
    }

    pub fn into_parts(self) -> (&'a Node, Path<'a>) {
        (self.node, self.path)
    }
}

/// Resumable search over a tree for nodes matching a pattern.
///
/// Matches come out in depth-first, left-to-right order. Once the search
/// reports exhaustion it keeps doing so.
///
/// # Example
///
/// ```
/// use pathwalk::pattern::Pattern;
/// use pathwalk::traversal::Traversal;
/// use pathwalk::tree::Node;
///
/// let user = Node::object(
///     "user",
///     [("name", Node::leaf("Sergey").unwrap()), ("age", Node::leaf("27").unwrap())],
/// )
/// .unwrap();
/// let root = Node::object("root", [("user", user)]).unwrap();
/// let pattern = Pattern::parse("$.user.*").unwrap();
///
/// let mut traversal = Traversal::new(&root, &pattern);
/// let first = traversal.try_next().unwrap().unwrap();
/// assert_eq!(first.node().id(), "Sergey");
/// assert_eq!(first.path().to_string(), "$.user.name");
///
/// let second = traversal.try_next().unwrap().unwrap();
/// assert_eq!(second.node().id(), "27");
///
/// assert!(traversal.try_next().unwrap().is_none());
/// assert!(traversal.try_next().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct Traversal<'a, 'p> {
    pattern: &'p Pattern,
    /// Node under examination, `None` once the search is drained.
    current: Option<Frame<'a>>,
    /// Open ancestors of `current`, root-most first.
    stack: Vec<Frame<'a>>,
    /// Index into `pattern` for `current`. Always equals `stack.len()`.
    depth: usize,
}

impl<'a, 'p> Traversal<'a, 'p> {
    pub fn new(root: &'a Node, pattern: &'p Pattern) -> Self {
        Self {
            pattern,
            current: Some(Frame::new(root, PathStep::Root)),
            stack: Vec::new(),
            depth: 0,
        }
    }

    pub fn pattern(&self) -> &'p Pattern {
        self.pattern
    }

    /// Number of pattern levels matched along the current path.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Finds the next match.
    ///
    /// Returns `Ok(None)` when the search is exhausted, and keeps returning
    /// it on later calls.
    ///
    /// # Errors
    ///
    /// [`TraversalError::InvariantViolation`] if the engine state is
    /// inconsistent. The search is abandoned and later calls return
    /// `Ok(None)`.
    pub fn try_next(&mut self) -> Result<Option<Match<'a>>, TraversalError> {
        loop {
            let Some(current) = self.current.as_ref() else {
                return Ok(None);
            };

            let criterion = match self.pattern.get(self.depth) {
                Some(criterion) if self.stack.len() == self.depth => criterion,
                _ => return Err(self.abort()),
            };

            if !matches(&current.step, criterion) {
                self.advance_sibling();
                continue;
            }

            if self.depth == self.pattern.last_index() {
                let found = self.current_match(current);
                debug!(path = %found.path, id = found.node.id(), "match");
                self.back_out();
                return Ok(Some(found));
            }

            self.descend();
        }
    }

    fn current_match(&self, current: &Frame<'a>) -> Match<'a> {
        let path = self
            .stack
            .iter()
            .map(|frame| frame.step)
            .chain(iter::once(current.step))
            .collect();
        Match {
            node: current.node,
            path,
        }
    }

    /// Commits to the children of `current`. An empty descent drops the
    /// frame and resumes from its parent.
    fn descend(&mut self) {
        let Some(frame) = self.current.take() else {
            return;
        };
        self.depth += 1;
        self.stack.push(frame);

        match self.stack.last_mut().and_then(|top| top.cursor.advance()) {
            Some((step, node)) => {
                trace!(depth = self.depth, step = %step, "descend");
                self.current = Some(Frame::new(node, step));
            }
            None => {
                self.depth -= 1;
                self.stack.pop();
                trace!(depth = self.depth, "no children");
                self.back_out();
            }
        }
    }

    /// Replaces `current` with its next sibling, or backs out when the
    /// parent has none left (or there is no parent).
    fn advance_sibling(&mut self) {
        match self.stack.last_mut().and_then(|parent| parent.cursor.advance()) {
            Some((step, node)) => {
                trace!(depth = self.depth, step = %step, "advance");
                self.current = Some(Frame::new(node, step));
            }
            None => self.back_out(),
        }
    }

    /// Makes the parent of `current` the node under examination.
    fn back_out(&mut self) {
        self.current = self.stack.pop();
        if self.current.is_some() {
            self.depth -= 1;
            trace!(depth = self.depth, "backtrack");
        } else {
            trace!("exhausted");
        }
    }

    fn abort(&mut self) -> TraversalError {
        let err = TraversalError::InvariantViolation {
            depth: self.depth,
            stack_len: self.stack.len(),
            pattern_len: self.pattern.len(),
        };
        self.current = None;
        self.stack.clear();
        self.depth = 0;
        err
    }
}

impl<'a> Iterator for Traversal<'a, '_> {
    type Item = Result<Match<'a>, TraversalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().transpose()
    }
}

impl FusedIterator for Traversal<'_, '_> {}
