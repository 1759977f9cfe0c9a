//! One-layer BFS expansion and the per-search state it mutates.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use tracing::debug;

use crate::error::Result;
use crate::store::{GraphStore, Link};
use crate::types::{Node, NodeKind, PersonId, WorkId};

/// The unvisited nodes discovered by the most recent layer.
///
/// A frontier holds a single node kind; expanding it yields the other kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Frontier {
    People(HashSet<PersonId>),
    Works(HashSet<WorkId>),
}

impl Frontier {
    /// The frontier every search starts from.
    pub(crate) fn start(source: PersonId) -> Self {
        Self::People(HashSet::from([source]))
    }

    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            Self::People(_) => NodeKind::Person,
            Self::Works(_) => NodeKind::Work,
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::People(ids) => ids.len(),
            Self::Works(ids) => ids.len(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Visited sets and parent links for one search invocation.
///
/// Both visited sets only ever grow, which is what guarantees termination.
/// Nothing here outlives the search.
#[derive(Debug)]
pub(crate) struct SearchState {
    pub(crate) visited_people: HashSet<PersonId>,
    pub(crate) visited_works: HashSet<WorkId>,
    /// Discovered node -> the node (of the other kind) that first reached it.
    pub(crate) parents: HashMap<Node, Node>,
    /// Number of layers expanded, i.e. edges from the source to the newest frontier.
    pub(crate) depth: u32,
}

impl SearchState {
    pub(crate) fn new(source: PersonId) -> Self {
        Self {
            visited_people: HashSet::from([source]),
            visited_works: HashSet::new(),
            parents: HashMap::new(),
            depth: 0,
        }
    }

    /// Total nodes of both kinds discovered so far, including the source.
    pub(crate) fn discovered(&self) -> usize {
        self.visited_people.len() + self.visited_works.len()
    }
}

/// Advances a search by exactly one layer.
pub(crate) struct FrontierExpander<'s, S: ?Sized> {
    store: &'s S,
    queries: usize,
}

impl<'s, S: GraphStore + ?Sized> FrontierExpander<'s, S> {
    pub(crate) fn new(store: &'s S) -> Self {
        Self { store, queries: 0 }
    }

    /// Adjacency queries issued so far.
    pub(crate) fn queries(&self) -> usize {
        self.queries
    }

    /// Expand `frontier` into the next layer.
    ///
    /// Every newly discovered node gets a parent link and joins its visited set
    /// before this returns, so the next layer can never rediscover it.
    pub(crate) fn expand(&mut self, state: &mut SearchState, frontier: &Frontier) -> Result<Frontier> {
        self.queries += 1;
        state.depth += 1;

        let next = match frontier {
            Frontier::People(people) => {
                let links = self
                    .store
                    .neighbors_of_persons(people, &state.visited_works)?;
                let chosen = choose_predecessors(links, &state.visited_works);
                let mut works = HashSet::with_capacity(chosen.len());
                for (work, person) in chosen {
                    state
                        .parents
                        .insert(Node::Work(work), Node::Person(person));
                    state.visited_works.insert(work);
                    works.insert(work);
                }
                Frontier::Works(works)
            }
            Frontier::Works(works) => {
                let links = self
                    .store
                    .neighbors_of_works(works, &state.visited_people)?;
                let chosen = choose_predecessors(links, &state.visited_people);
                let mut people = HashSet::with_capacity(chosen.len());
                for (person, work) in chosen {
                    state
                        .parents
                        .insert(Node::Person(person), Node::Work(work));
                    state.visited_people.insert(person);
                    people.insert(person);
                }
                Frontier::People(people)
            }
        };

        debug!(
            depth = state.depth,
            from = %frontier.kind(),
            frontier = frontier.len(),
            discovered = next.len(),
            total = state.discovered(),
            "Expanded layer"
        );

        Ok(next)
    }
}

/// Pick one predecessor per newly discovered node.
///
/// When a node is reachable from several frontier members, the numerically
/// smallest member wins. Stores return links in no particular order, so this is
/// what makes repeated searches reproducible. Nodes already visited are dropped
/// even if the store failed to exclude them.
fn choose_predecessors<N, V>(links: Vec<Link<N, V>>, visited: &HashSet<N>) -> BTreeMap<N, V>
where
    N: Ord + Hash + Copy,
    V: Ord + Copy,
{
    let mut chosen: BTreeMap<N, V> = BTreeMap::new();
    for Link { node, via } in links {
        if visited.contains(&node) {
            continue;
        }
        chosen
            .entry(node)
            .and_modify(|current| {
                if via < *current {
                    *current = via;
                }
            })
            .or_insert(via);
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryGraphStore;

    #[test]
    fn choose_predecessors_prefers_smallest_id() {
        let links = vec![
            Link::new(WorkId(10), PersonId(7)),
            Link::new(WorkId(10), PersonId(3)),
            Link::new(WorkId(10), PersonId(5)),
            Link::new(WorkId(11), PersonId(9)),
        ];

        let chosen = choose_predecessors(links, &HashSet::new());

        assert_eq!(chosen.len(), 2);
        assert_eq!(chosen[&WorkId(10)], PersonId(3));
        assert_eq!(chosen[&WorkId(11)], PersonId(9));
    }

    #[test]
    fn choose_predecessors_drops_visited_nodes() {
        let links = vec![
            Link::new(WorkId(10), PersonId(1)),
            Link::new(WorkId(11), PersonId(1)),
        ];

        let chosen = choose_predecessors(links, &HashSet::from([WorkId(10)]));

        assert_eq!(chosen.keys().copied().collect::<Vec<_>>(), vec![WorkId(11)]);
    }

    #[test]
    fn expand_alternates_kinds_and_records_parents() {
        let store = MemoryGraphStore::from_edges(&[1, 2, 3], &[(1, 100), (2, 100), (3, 100)]);
        let mut state = SearchState::new(PersonId(1));
        let mut expander = FrontierExpander::new(&store);

        let works = expander
            .expand(&mut state, &Frontier::start(PersonId(1)))
            .unwrap();
        assert_eq!(works, Frontier::Works(HashSet::from([WorkId(100)])));
        assert_eq!(
            state.parents[&Node::Work(WorkId(100))],
            Node::Person(PersonId(1))
        );

        let people = expander.expand(&mut state, &works).unwrap();
        assert_eq!(
            people,
            Frontier::People(HashSet::from([PersonId(2), PersonId(3)]))
        );
        assert_eq!(state.depth, 2);
        assert_eq!(state.discovered(), 4);
        assert_eq!(expander.queries(), 2);
    }

    #[test]
    fn expand_never_rediscovers_visited_nodes() {
        let store = MemoryGraphStore::from_edges(&[1, 2], &[(1, 100), (2, 100)]);
        let mut state = SearchState::new(PersonId(1));
        let mut expander = FrontierExpander::new(&store);

        let works = expander
            .expand(&mut state, &Frontier::start(PersonId(1)))
            .unwrap();
        let people = expander.expand(&mut state, &works).unwrap();
        let again = expander.expand(&mut state, &people).unwrap();

        // Work 100 was visited in the first layer
        assert!(again.is_empty());
        assert_eq!(again.kind(), NodeKind::Work);
    }

    #[test]
    fn expand_work_layer_picks_smallest_work_as_parent() {
        // Person 9 is reachable from both works in the same layer
        let store = MemoryGraphStore::from_edges(&[1, 9], &[(1, 300), (1, 200), (9, 300), (9, 200)]);
        let mut state = SearchState::new(PersonId(1));
        let mut expander = FrontierExpander::new(&store);

        let works = expander
            .expand(&mut state, &Frontier::start(PersonId(1)))
            .unwrap();
        expander.expand(&mut state, &works).unwrap();

        assert_eq!(
            state.parents[&Node::Person(PersonId(9))],
            Node::Work(WorkId(200))
        );
    }
}
