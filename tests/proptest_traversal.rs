//! Property-based tests for the traversal engine.
//!
//! Random trees and patterns are checked against a plain recursive walk:
//! 1. Every traversal terminates and stays exhausted
//! 2. Every match satisfies the pattern at every depth
//! 3. Matches are exactly the satisfying nodes, in depth-first order
//! 4. Literal index criteria never match

use proptest::prelude::*;

use pathwalk::pattern::{Criterion, PathStep, Pattern};
use pathwalk::traversal::Traversal;
use pathwalk::tree::{Children, Node};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Shape {
    Leaf(String),
    Array(Vec<Shape>),
    Object(Vec<(String, Shape)>),
}

impl Shape {
    fn build(&self, id: String) -> Node {
        match self {
            Shape::Leaf(text) => Node::leaf(text.clone()).unwrap(),
            Shape::Array(items) => Node::array(
                id.clone(),
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| item.build(format!("{}[{}]", id, i))),
            )
            .unwrap(),
            Shape::Object(entries) => Node::object(
                id.clone(),
                entries
                    .iter()
                    .map(|(key, item)| (key.clone(), item.build(format!("{}.{}", id, key)))),
            )
            .unwrap(),
        }
    }
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = "[a-z]{1,3}".prop_map(Shape::Leaf);
    leaf.prop_recursive(4, 40, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Shape::Array),
            prop::collection::vec(("[a-c]", inner), 0..4).prop_map(Shape::Object),
        ]
    })
}

fn criterion_strategy() -> impl Strategy<Value = Criterion> {
    prop_oneof![
        3 => "[a-c]".prop_map(Criterion::Key),
        3 => Just(Criterion::AnyKey),
        3 => Just(Criterion::AnyIndex),
        1 => (0usize..3).prop_map(Criterion::Index),
        1 => Just(Criterion::Root),
    ]
}

fn pattern_strategy() -> impl Strategy<Value = Pattern> {
    (
        prop_oneof![9 => Just(Criterion::Root), 1 => criterion_strategy()],
        prop::collection::vec(criterion_strategy(), 0..5),
    )
        .prop_map(|(first, rest)| {
            let mut criteria = vec![first];
            criteria.extend(rest);
            Pattern::new(criteria).unwrap()
        })
}

// ── Reference walk ──────────────────────────────────────────────────────

type Found<'a> = (Vec<PathStep<'a>>, *const Node);

fn walk<'a>(node: &'a Node, steps: &mut Vec<PathStep<'a>>, out: &mut Vec<Found<'a>>) {
    out.push((steps.clone(), node as *const Node));
    match node.children() {
        Children::None => {}
        Children::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                steps.push(PathStep::Index(index));
                walk(child, steps, out);
                steps.pop();
            }
        }
        Children::Mapping(entries) => {
            for (key, child) in entries {
                steps.push(PathStep::Key(key));
                walk(child, steps, out);
                steps.pop();
            }
        }
    }
}

fn expected<'a>(root: &'a Node, pattern: &Pattern) -> Vec<Found<'a>> {
    let mut all = Vec::new();
    walk(root, &mut vec![PathStep::Root], &mut all);
    all.into_iter()
        .filter(|(steps, _)| pattern.is_satisfied_by(steps))
        .collect()
}

fn count_nodes(node: &Node) -> usize {
    let mut all = Vec::new();
    walk(node, &mut vec![PathStep::Root], &mut all);
    all.len()
}

fn actual<'a>(root: &'a Node, pattern: &Pattern) -> Vec<Found<'a>> {
    Traversal::new(root, pattern)
        .map(|found| {
            let found = found.unwrap();
            (found.steps().to_vec(), found.node() as *const Node)
        })
        .collect()
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    /// Every traversal ends, and keeps reporting exhaustion afterwards.
    #[test]
    fn prop_traversal_terminates(shape in shape_strategy(), pattern in pattern_strategy()) {
        let root = shape.build("$".to_string());
        let bound = count_nodes(&root);
        let mut traversal = Traversal::new(&root, &pattern);

        let mut produced = 0;
        while traversal.try_next().unwrap().is_some() {
            produced += 1;
            prop_assert!(produced <= bound, "more matches than nodes");
        }
        for _ in 0..3 {
            prop_assert!(traversal.try_next().unwrap().is_none());
        }
        prop_assert!(traversal.is_exhausted());
    }

    /// Every match's path satisfies the pattern step by step.
    #[test]
    fn prop_matches_are_sound(shape in shape_strategy(), pattern in pattern_strategy()) {
        let root = shape.build("$".to_string());
        for found in Traversal::new(&root, &pattern) {
            let found = found.unwrap();
            prop_assert!(pattern.is_satisfied_by(found.steps()),
                "match {} does not satisfy {}", found.path(), pattern);
        }
    }

    /// Matches are exactly the satisfying nodes, each once, in depth-first order.
    #[test]
    fn prop_matches_are_complete_and_ordered(shape in shape_strategy(), pattern in pattern_strategy()) {
        let root = shape.build("$".to_string());
        prop_assert_eq!(actual(&root, &pattern), expected(&root, &pattern));
    }

    /// A literal index criterion anywhere in the pattern rules out every match.
    #[test]
    fn prop_literal_index_never_matches(
        shape in shape_strategy(),
        pattern in pattern_strategy(),
        index in 0usize..3,
    ) {
        let root = shape.build("$".to_string());
        let mut criteria = pattern.criteria().to_vec();
        criteria.push(Criterion::Index(index));
        let pattern = Pattern::new(criteria).unwrap();
        prop_assert!(actual(&root, &pattern).is_empty());
    }
}
