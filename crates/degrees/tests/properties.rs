//! Property tests: the layered search agrees with a whole-graph shortest path
//! algorithm on random bipartite graphs.

use std::collections::BTreeSet;

use degrees::{
    Appearance, Database, MemoryGraphStore, Node, Person, PersonId, Role, SearchError,
    SqlGraphStore, Work, WorkId, find_shortest_path,
};
use petgraph::algo::dijkstra;
use proptest::{
    collection::vec,
    prelude::{Just, Strategy, prop_assert, prop_assert_eq},
    proptest,
    sample::Index,
    test_runner::Config as ProptestConfig,
};

const FIRST_WORK_ID: i64 = 100;

/// People `1..=n`, works `100..100+m`, and up to 30 random edges between them.
fn graph_strategy() -> impl Strategy<Value = (Vec<i64>, Vec<(i64, i64)>)> {
    (1_i64..10, 1_i64..8).prop_flat_map(|(people, works)| {
        let ids: Vec<i64> = (1..=people).collect();
        let edges = vec((1..=people, FIRST_WORK_ID..FIRST_WORK_ID + works), 0..30);
        (Just(ids), edges)
    })
}

fn sql_store(people: &[i64], edges: &[(i64, i64)]) -> Database {
    let db = Database::open_in_memory().expect("open database");
    for &id in people {
        db.insert_person(&Person::named(id, format!("Person {id}")))
            .expect("insert person");
    }
    let works: BTreeSet<i64> = edges.iter().map(|&(_, work)| work).collect();
    for work in works {
        db.insert_work(&Work::titled(work, format!("Work {work}")))
            .expect("insert work");
    }
    for &(person, work) in edges {
        db.insert_appearance(&Appearance {
            person_id: PersonId(person),
            work_id: WorkId(work),
            role: Role::Actor,
        })
        .expect("insert appearance");
    }
    db
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn path_length_matches_dijkstra(
        (people, edges) in graph_strategy(),
        a in proptest::arbitrary::any::<Index>(),
        b in proptest::arbitrary::any::<Index>(),
    ) {
        let store = MemoryGraphStore::from_edges(&people, &edges);
        let source = PersonId(people[a.index(people.len())]);
        let target = PersonId(people[b.index(people.len())]);

        let start = store.node_index(Node::Person(source)).expect("source indexed");
        let goal = store.node_index(Node::Person(target)).expect("target indexed");
        let distances = dijkstra(store.graph(), start, Some(goal), |_| 1_usize);

        match find_shortest_path(source, target, &store) {
            Ok(path) => {
                prop_assert_eq!(Some(&path.edge_count()), distances.get(&goal));
                prop_assert_eq!(path.source(), source);
                prop_assert_eq!(path.target(), target);
                for pair in path.nodes().windows(2) {
                    let x = store.node_index(pair[0]).expect("node indexed");
                    let y = store.node_index(pair[1]).expect("node indexed");
                    prop_assert!(store.graph().find_edge(x, y).is_some());
                }
            }
            Err(SearchError::NoPath { .. }) => {
                prop_assert!(!distances.contains_key(&goal));
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn search_is_symmetric_in_length(
        (people, edges) in graph_strategy(),
        a in proptest::arbitrary::any::<Index>(),
        b in proptest::arbitrary::any::<Index>(),
    ) {
        let store = MemoryGraphStore::from_edges(&people, &edges);
        let source = PersonId(people[a.index(people.len())]);
        let target = PersonId(people[b.index(people.len())]);

        let forward = find_shortest_path(source, target, &store).ok().map(|p| p.edge_count());
        let backward = find_shortest_path(target, source, &store).ok().map(|p| p.edge_count());

        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn stores_return_identical_paths(
        (people, edges) in graph_strategy(),
        a in proptest::arbitrary::any::<Index>(),
        b in proptest::arbitrary::any::<Index>(),
    ) {
        let memory = MemoryGraphStore::from_edges(&people, &edges);
        let db = sql_store(&people, &edges);
        let source = PersonId(people[a.index(people.len())]);
        let target = PersonId(people[b.index(people.len())]);

        let from_memory = find_shortest_path(source, target, &memory).ok();
        let from_sql = find_shortest_path(source, target, &SqlGraphStore::new(&db)).ok();

        prop_assert_eq!(from_memory, from_sql);
    }
}
