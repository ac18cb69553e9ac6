//! Extended operator syntax through the index.

use crate::common::*;
use bitfuse::{Config, Fuse, SearchOptions};

fn files() -> Fuse<&'static str> {
    let items = vec![
        "main.rs",
        "main_test.rs",
        "README.md",
        "lib.rs",
        "CHANGELOG.md",
        "test_utils.py",
    ];
    Fuse::new(items, Config::default().extended_search(true).include_score(true)).unwrap()
}

fn hits(fuse: &Fuse<&'static str>, query: &str) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = fuse.search(query).iter().map(|r| *r.item).collect();
    found.sort_unstable();
    found
}

#[test]
fn test_exact_operator() {
    assert_eq!(hits(&files(), "=lib.rs"), vec!["lib.rs"]);
    assert!(hits(&files(), "=lib").is_empty());
}

#[test]
fn test_include_operator() {
    assert_eq!(hits(&files(), "'test"), vec!["main_test.rs", "test_utils.py"]);
}

#[test]
fn test_prefix_and_suffix() {
    assert_eq!(hits(&files(), "^main"), vec!["main.rs", "main_test.rs"]);
    assert_eq!(hits(&files(), ".md$"), vec!["CHANGELOG.md", "README.md"]);
}

#[test]
fn test_inverse_operators() {
    assert_eq!(
        hits(&files(), "!.rs$"),
        vec!["CHANGELOG.md", "README.md", "test_utils.py"]
    );
    assert_eq!(
        hits(&files(), "!^main"),
        vec!["CHANGELOG.md", "README.md", "lib.rs", "test_utils.py"]
    );
    assert_eq!(hits(&files(), "!test"), vec!["CHANGELOG.md", "README.md", "lib.rs", "main.rs"]);
}

#[test]
fn test_and_of_terms() {
    assert_eq!(hits(&files(), "^main !test"), vec!["main.rs"]);
    assert_eq!(hits(&files(), ".rs$ !^main"), vec!["lib.rs"]);
}

#[test]
fn test_or_of_groups() {
    assert_eq!(
        hits(&files(), "^main !test | .md$"),
        vec!["CHANGELOG.md", "README.md", "main.rs"]
    );
}

#[test]
fn test_exact_terms_score_zero() {
    let fuse = files();
    let results = fuse.search("^main .rs$");
    assert!(!results.is_empty());
    assert!(scores(&results).iter().all(|&s| s == 0.0));
}

#[test]
fn test_fuzzy_term_inside_extended() {
    let fuse = files();
    let results = fuse.search("readme");
    assert_eq!(*results[0].item, "README.md");
    assert!(results[0].score.unwrap() > 0.0);
}

#[test]
fn test_quoted_term_keeps_spaces() {
    let items = vec!["old man's war", "man of war", "war and peace"];
    let fuse = Fuse::new(items, Config::default().extended_search(true)).unwrap();
    let found: Vec<&str> = fuse.search("'\"man of\"").iter().map(|r| *r.item).collect();
    assert_eq!(found, vec!["man of war"]);
}

#[test]
fn test_extended_on_keyed_records() {
    let config = Config::default()
        .with_keys(["title", "author"])
        .extended_search(true);
    let fuse = book_index(config);
    let results = fuse.search("^john");
    let mut refs = ref_indices(&results);
    refs.sort_unstable();
    // Titles and authors that start with "john"
    assert_eq!(refs, vec![0, 2, 3]);
}

#[test]
fn test_plain_mode_treats_operators_literally() {
    let fuse = Fuse::new(vec!["^main", "main"], Config::default().include_score(true)).unwrap();
    let results = fuse.search_with("^main", SearchOptions::limit(1));
    assert_eq!(*results[0].item, "^main");
    assert_eq!(results[0].score, Some(0.0));
}

#[test]
fn test_bare_operator_is_fuzzy_text() {
    let fuse = Fuse::new(vec!["a=b", "x"], Config::default().extended_search(true)).unwrap();
    // "=" alone has no body, so it is searched for as text
    let found: Vec<&str> = fuse.search("=").iter().map(|r| *r.item).collect();
    assert_eq!(found, vec!["a=b"]);
}
