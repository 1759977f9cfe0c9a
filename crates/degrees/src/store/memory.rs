//! In-memory implementation of [`GraphStore`] backed by petgraph.
//!
//! Holds the whole graph, so it is only suitable for fixtures and tests. It
//! counts adjacency queries, which lets tests check how many round-trips a
//! search costs and that validation happens before any traversal.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use petgraph::graph::{NodeIndex, UnGraph};

use super::{GraphStore, Link};
use crate::error::Result;
use crate::types::{Node, PersonId, WorkId};

/// Graph store holding every node and edge in memory.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    graph: UnGraph<Node, ()>,
    node_map: HashMap<Node, NodeIndex>,
    appearance_queries: AtomicUsize,
}

impl MemoryGraphStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from person ids and `(person, work)` edges.
    ///
    /// Works are created from the edges. People listed only in `people` exist
    /// with no edges.
    #[must_use]
    pub fn from_edges(people: &[i64], edges: &[(i64, i64)]) -> Self {
        let mut store = Self::new();
        for &id in people {
            store.add_person(PersonId(id));
        }
        for &(person, work) in edges {
            store.add_appearance(PersonId(person), WorkId(work));
        }
        store
    }

    fn add_node(&mut self, node: Node) -> NodeIndex {
        *self
            .node_map
            .entry(node)
            .or_insert_with(|| self.graph.add_node(node))
    }

    /// Add a person with no edges. Adding an existing person is a no-op.
    pub fn add_person(&mut self, id: PersonId) {
        self.add_node(Node::Person(id));
    }

    /// Add a work with no edges. Adding an existing work is a no-op.
    pub fn add_work(&mut self, id: WorkId) {
        self.add_node(Node::Work(id));
    }

    /// Add an appearance edge, creating either endpoint if needed.
    ///
    /// At most one edge exists per `(person, work)` pair.
    pub fn add_appearance(&mut self, person: PersonId, work: WorkId) {
        let a = self.add_node(Node::Person(person));
        let b = self.add_node(Node::Work(work));
        self.graph.update_edge(a, b, ());
    }

    /// Number of adjacency queries answered so far.
    #[must_use]
    pub fn appearance_queries(&self) -> usize {
        self.appearance_queries.load(Ordering::Relaxed)
    }

    /// The underlying graph, for algorithms that need the whole thing.
    #[must_use]
    pub fn graph(&self) -> &UnGraph<Node, ()> {
        &self.graph
    }

    /// Graph index of a node, if present.
    #[must_use]
    pub fn node_index(&self, node: Node) -> Option<NodeIndex> {
        self.node_map.get(&node).copied()
    }

    fn links<F, N, V>(&self, from: impl Iterator<Item = (Node, V)>, mut keep: F) -> Vec<Link<N, V>>
    where
        F: FnMut(Node) -> Option<N>,
        V: Copy,
    {
        self.appearance_queries.fetch_add(1, Ordering::Relaxed);

        let mut links = Vec::new();
        for (node, via) in from {
            let Some(&index) = self.node_map.get(&node) else {
                continue;
            };
            for neighbor in self.graph.neighbors(index) {
                if let Some(n) = keep(self.graph[neighbor]) {
                    links.push(Link::new(n, via));
                }
            }
        }
        links
    }
}

impl GraphStore for MemoryGraphStore {
    fn neighbors_of_persons(
        &self,
        person_ids: &HashSet<PersonId>,
        excluded_works: &HashSet<WorkId>,
    ) -> Result<Vec<Link<WorkId, PersonId>>> {
        Ok(self.links(
            person_ids.iter().map(|&id| (Node::Person(id), id)),
            |node| match node {
                Node::Work(id) if !excluded_works.contains(&id) => Some(id),
                _ => None,
            },
        ))
    }

    fn neighbors_of_works(
        &self,
        work_ids: &HashSet<WorkId>,
        excluded_persons: &HashSet<PersonId>,
    ) -> Result<Vec<Link<PersonId, WorkId>>> {
        Ok(self.links(
            work_ids.iter().map(|&id| (Node::Work(id), id)),
            |node| match node {
                Node::Person(id) if !excluded_persons.contains(&id) => Some(id),
                _ => None,
            },
        ))
    }

    fn person_exists(&self, id: PersonId) -> Result<bool> {
        Ok(self.node_map.contains_key(&Node::Person(id)))
    }
}
