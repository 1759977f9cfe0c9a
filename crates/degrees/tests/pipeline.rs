//! End to end: load dataset files, clean, resolve names, search, describe.

use std::fs;
use std::path::Path;

use degrees::ingest::{CleanRules, DatasetPaths, clean, load_dataset};
use degrees::{
    Database, Error, PersonId, SqlGraphStore, describe_path, find_shortest_path, resolve_person,
};
use tempfile::TempDir;

const TITLES: &str = "\
tconst\ttitleType\tprimaryTitle\toriginalTitle\tisAdult\tstartYear\tendYear\truntimeMinutes\tgenres
tt0112384\tmovie\tApollo 13\tApollo 13\t0\t1995\t\\N\t140\tAdventure,Drama,History
tt0109830\tmovie\tForrest Gump\tForrest Gump\t0\t1994\t\\N\t142\tDrama,Romance
tt0000003\ttvSeries\tLate Chat\tLate Chat\t0\t2001\t2005\t30\tComedy,Talk-Show
tt0000004\tvideoGame\tSome Game\tSome Game\t0\t2010\t\\N\t\\N\tAction
tt0000005\tmovie\tObscure Picture\tObscure Picture\t0\t1999\t\\N\t80\tDrama
";

const RATINGS: &str = "\
tconst\taverageRating\tnumVotes
tt0112384\t7.7\t300000
tt0109830\t8.8\t2000000
tt0000003\t6.1\t1000
tt0000004\t5.5\t500
tt0000005\t4.0\t5
";

const NAMES: &str = "\
nconst\tprimaryName\tbirthYear\tdeathYear\tprimaryProfession\tknownForTitles
nm0000102\tKevin Bacon\t1958\t\\N\tactor,producer\ttt0112384
nm0000158\tTom Hanks\t1956\t\\N\tactor,producer\ttt0109830,tt0112384
nm0000705\tRobin Wright\t1966\t\\N\tactress\ttt0109830
nm0000001\tHost Person\t\\N\t\\N\t\\N\t\\N
nm0000002\tGame Player\t\\N\t\\N\t\\N\t\\N
nm0000003\tExtra Person\t\\N\t\\N\t\\N\t\\N
";

const PRINCIPALS: &str = "\
tconst\tordering\tnconst\tcategory\tjob\tcharacters
tt0112384\t1\tnm0000158\tactor\t\\N\t[\"Jim Lovell\"]
tt0112384\t2\tnm0000102\tactor\t\\N\t[\"Jack Swigert\"]
tt0109830\t1\tnm0000158\tactor\t\\N\t[\"Forrest\"]
tt0109830\t2\tnm0000705\tactress\t\\N\t[\"Jenny Curran\"]
tt0000003\t1\tnm0000001\tself\t\\N\t\\N
tt0000003\t2\tnm0000102\tself\t\\N\t\\N
tt0000004\t1\tnm0000002\tactor\t\\N\t\\N
tt0000004\t2\tnm0000705\tactress\t\\N\t\\N
tt0000005\t1\tnm0000003\tactor\t\\N\t\\N
tt0000005\t2\tnm0000102\tactor\t\\N\t\\N
";

fn write_dataset(dir: &Path) -> DatasetPaths {
    let paths = DatasetPaths::in_dir(dir);
    fs::write(&paths.titles, TITLES).expect("write titles");
    fs::write(&paths.ratings, RATINGS).expect("write ratings");
    fs::write(&paths.names, NAMES).expect("write names");
    fs::write(&paths.principals, PRINCIPALS).expect("write principals");
    paths
}

fn loaded_db(dir: &TempDir) -> Database {
    let paths = write_dataset(dir.path());
    let db = Database::open(&dir.path().join("degrees.db")).expect("open database");
    let stats = load_dataset(&db, &paths, 4).expect("load dataset");
    assert!(stats.warnings.is_empty(), "warnings: {:?}", stats.warnings);
    db
}

#[test]
fn load_stores_every_row() {
    let dir = TempDir::new().expect("create temp dir");
    let db = loaded_db(&dir);

    let stats = db.stats().expect("stats");
    assert_eq!(stats.works, 5);
    assert_eq!(stats.ratings, 5);
    assert_eq!(stats.people, 6);
    assert_eq!(stats.appearances, 10);
}

#[test]
fn talk_show_connects_before_cleaning() {
    let dir = TempDir::new().expect("create temp dir");
    let db = loaded_db(&dir);
    let store = SqlGraphStore::new(&db);

    let bacon = resolve_person(&db, "kevin bacon").expect("resolve");
    let host = resolve_person(&db, "Host Person").expect("resolve");
    let path = find_shortest_path(bacon.id, host.id, &store).expect("path");

    assert_eq!(path.degrees(), 1);
}

#[test]
fn clean_prunes_works_and_orphans() {
    let dir = TempDir::new().expect("create temp dir");
    let db = loaded_db(&dir);

    let stats = clean(&db, &CleanRules::default()).expect("clean");

    assert_eq!(stats.category_works, 1);
    assert_eq!(stats.unpopular_works, 1);
    assert_eq!(stats.genre_works, 1);
    assert_eq!(stats.orphaned_people, 3);

    let err = resolve_person(&db, "Host Person").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn cleaned_graph_answers_with_described_path() {
    let dir = TempDir::new().expect("create temp dir");
    let db = loaded_db(&dir);
    clean(&db, &CleanRules::default()).expect("clean");
    let store = SqlGraphStore::new(&db);

    let bacon = resolve_person(&db, "Bacon").expect("resolve");
    let wright = resolve_person(&db, "robin wright").expect("resolve");
    let path = find_shortest_path(bacon.id, wright.id, &store).expect("path");

    assert_eq!(path.degrees(), 2);
    assert_eq!(
        path.people(),
        vec![PersonId(102), PersonId(158), PersonId(705)]
    );

    let steps = describe_path(&db, &path).expect("describe");
    let sentences: Vec<_> = steps.iter().map(|s| s.sentence.as_str()).collect();
    assert_eq!(
        sentences,
        vec![
            "Kevin Bacon was an actor in Apollo 13 (1995) where Tom Hanks was an actor.",
            "Tom Hanks was an actor in Forrest Gump (1994) where Robin Wright was an actress.",
        ]
    );
    assert_eq!(steps[1].rating.and_then(|r| r.votes), Some(2_000_000));
}
