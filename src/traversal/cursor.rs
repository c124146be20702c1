//! Single-pass iteration over one node's children.

use std::iter::{Enumerate, FusedIterator};
use std::slice;
use std::sync::Arc;

use indexmap::map;

use crate::pattern::PathStep;
use crate::tree::{Children, Node};

enum ChildIter<'a> {
    Leaf,
    Array(Enumerate<slice::Iter<'a, Arc<Node>>>),
    Object(map::Iter<'a, String, Arc<Node>>),
}

/// Produces the children of one node as `(PathStep, &Node)` pairs.
///
/// Arrays yield by increasing index, objects by key insertion order. A cursor
/// over a leaf is exhausted from the start. Once exhausted, `advance` keeps
/// returning `None`. A cursor is never rewound; each pair is produced once.
pub struct ChildCursor<'a> {
    iter: ChildIter<'a>,
}

impl<'a> ChildCursor<'a> {
    pub fn new(node: &'a Node) -> Self {
        let iter = match node.children() {
            Children::None => ChildIter::Leaf,
            Children::Sequence(items) => ChildIter::Array(items.iter().enumerate()),
            Children::Mapping(entries) => ChildIter::Object(entries.iter()),
        };
        Self { iter }
    }

    /// Returns the next child and the step leading to it, or `None` once all
    /// children have been produced.
    pub fn advance(&mut self) -> Option<(PathStep<'a>, &'a Node)> {
        let next = match &mut self.iter {
            ChildIter::Leaf => None,
            ChildIter::Array(iter) => iter
                .next()
                .map(|(index, child)| (PathStep::Index(index), child.as_ref())),
            ChildIter::Object(iter) => iter
                .next()
                .map(|(key, child)| (PathStep::Key(key.as_str()), child.as_ref())),
        };
        if next.is_none() {
            // Drop the underlying iterator so later calls stay at the end.
            self.iter = ChildIter::Leaf;
        }
        next
    }

    /// True once no further children will be produced.
    pub fn is_exhausted(&self) -> bool {
        match &self.iter {
            ChildIter::Leaf => true,
            ChildIter::Array(iter) => iter.len() == 0,
            ChildIter::Object(iter) => iter.len() == 0,
        }
    }
}

impl<'a> Iterator for ChildCursor<'a> {
    type Item = (PathStep<'a>, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match &self.iter {
            ChildIter::Leaf => 0,
            ChildIter::Array(iter) => iter.len(),
            ChildIter::Object(iter) => iter.len(),
        };
        (remaining, Some(remaining))
    }
}

impl FusedIterator for ChildCursor<'_> {}

impl std::fmt::Debug for ChildCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildCursor")
            .field("remaining", &self.size_hint().0)
            .finish()
    }
}
