//! Collaboration paths and their reconstruction from parent links.

use std::collections::HashMap;

use serde::Serialize;

use super::SearchError;
use crate::types::{Node, PersonId, WorkId};

/// A chain of collaborations: `Person, Work, Person, ..., Person`.
///
/// Construction validates the shape, so every instance starts and ends on a
/// person and strictly alternates kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollaborationPath {
    nodes: Vec<Node>,
    #[serde(skip)]
    source: PersonId,
    #[serde(skip)]
    target: PersonId,
}

/// One hop of a path: two people who share a work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    /// The person closer to the source
    pub from: PersonId,
    /// The work they share
    pub work: WorkId,
    /// The person closer to the target
    pub to: PersonId,
}

impl CollaborationPath {
    /// Create a path, validating invariants.
    ///
    /// Returns `None` if `nodes`:
    /// - is empty or has even length
    /// - does not start and end on a person
    /// - has two consecutive nodes of the same kind
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Option<Self> {
        if nodes.len() % 2 == 0 {
            return None;
        }
        let alternates = nodes.iter().enumerate().all(|(i, node)| match node {
            Node::Person(_) => i % 2 == 0,
            Node::Work(_) => i % 2 == 1,
        });
        if !alternates {
            return None;
        }
        match (nodes.first(), nodes.last()) {
            (Some(&Node::Person(source)), Some(&Node::Person(target))) => Some(Self {
                nodes,
                source,
                target,
            }),
            _ => None,
        }
    }

    /// Create a trivial path with a single person.
    #[must_use]
    pub fn single(person: PersonId) -> Self {
        Self {
            nodes: vec![Node::Person(person)],
            source: person,
            target: person,
        }
    }

    /// Every node from source to target.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Consume the path and return the nodes.
    #[must_use]
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// First person of the path.
    #[must_use]
    pub fn source(&self) -> PersonId {
        self.source
    }

    /// Last person of the path.
    #[must_use]
    pub fn target(&self) -> PersonId {
        self.target
    }

    /// The people on the path, in order.
    #[must_use]
    pub fn people(&self) -> Vec<PersonId> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Person(id) => Some(*id),
                Node::Work(_) => None,
            })
            .collect()
    }

    /// The works on the path, in order.
    #[must_use]
    pub fn works(&self) -> Vec<WorkId> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Work(id) => Some(*id),
                Node::Person(_) => None,
            })
            .collect()
    }

    /// Consecutive `(person, work, person)` triples.
    #[must_use]
    pub fn hops(&self) -> Vec<Hop> {
        self.nodes
            .windows(3)
            .step_by(2)
            .filter_map(|w| match *w {
                [Node::Person(from), Node::Work(work), Node::Person(to)] => {
                    Some(Hop { from, work, to })
                }
                _ => None,
            })
            .collect()
    }

    /// Number of edges on the path. Always even.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Degrees of separation: the number of shared works.
    #[must_use]
    pub fn degrees(&self) -> usize {
        self.edge_count() / 2
    }

    /// Whether this is the single-person path of a self-search.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }
}

/// Walk parent links from `target` back to `source`.
///
/// `max_steps` bounds the walk; it is the depth the search reached, so a
/// well-formed parent map always finishes within it. Failing to do so, or
/// producing a malformed path, means the search state is corrupt.
pub(crate) fn reconstruct(
    target: PersonId,
    parents: &HashMap<Node, Node>,
    source: PersonId,
    max_steps: u32,
) -> Result<CollaborationPath, SearchError> {
    let start = Node::Person(source);
    let mut current = Node::Person(target);
    let mut nodes = vec![current];

    for _ in 0..max_steps {
        if current == start {
            break;
        }
        current = *parents.get(&current).ok_or_else(|| {
            SearchError::Inconsistent(format!("{current} has no parent link"))
        })?;
        nodes.push(current);
    }

    if current != start {
        return Err(SearchError::Inconsistent(format!(
            "walk from {target} did not reach {source} within {max_steps} steps"
        )));
    }

    nodes.reverse();
    CollaborationPath::new(nodes).ok_or_else(|| {
        SearchError::Inconsistent("reconstructed path does not alternate kinds".to_string())
    })
}
