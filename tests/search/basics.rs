//! String collections: the simplest index there is.

use crate::common::*;
use bitfuse::{Config, Fuse, SearchOptions};

#[test]
fn test_works_with_strings() {
    let fuse = fruit_index();
    let results = fuse.search("apple");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].item, "Apple");
    assert_eq!(results[0].ref_index, 0);
}

#[test]
fn test_nan_matches_banana_and_orange() {
    let fuse = fruit_index();
    let mut found: Vec<&str> = fuse.search("nan").iter().map(|r| r.item.as_str()).collect();
    found.sort_unstable();
    assert_eq!(found, vec!["Banana", "Orange"]);
}

#[test]
fn test_limit_one() {
    let fuse = fruit_index();
    let results = fuse.search_with("nan", SearchOptions::limit(1));
    assert_eq!(results.len(), 1);
}

#[test]
fn test_limit_zero_and_oversized() {
    let fuse = fruit_index();
    assert!(fuse.search_with("nan", SearchOptions::limit(0)).is_empty());
    assert_eq!(fuse.search_with("nan", SearchOptions::limit(100)).len(), 2);
}

#[test]
fn test_limit_keeps_the_best() {
    let fuse = Fuse::new(
        vec!["Banana", "Bananas", "Bandana"],
        Config::default().include_score(true),
    )
    .unwrap();
    let all = fuse.search("banana");
    let top = fuse.search_with("banana", SearchOptions::limit(1));
    assert_eq!(top[0].ref_index, all[0].ref_index);
    assert_eq!(top[0].ref_index, 0);
}

#[test]
fn test_exact_match_scores_zero() {
    let fuse = Fuse::new(fruits(), Config::default().include_score(true)).unwrap();
    for (i, fruit) in fruits().iter().enumerate() {
        let results = fuse.search(fruit);
        assert_eq!(results[0].ref_index, i);
        assert_eq!(results[0].score, Some(0.0));
    }
}

#[test]
fn test_results_are_ranked() {
    let items = vec![
        "The quick brown fox",
        "A quick brown dog",
        "Quick!",
        "quack",
        "slow and steady",
    ];
    let fuse = Fuse::new(items, Config::default().include_score(true)).unwrap();
    let results = fuse.search("quick");
    assert!(results.len() >= 3);
    assert_ranked(&results);
}

#[test]
fn test_empty_query_returns_nothing() {
    let fuse = fruit_index();
    assert!(fuse.search("").is_empty());
    assert!(fuse.search_with("", SearchOptions::limit(5)).is_empty());
}

#[test]
fn test_empty_index() {
    let fuse: Fuse<String> = Fuse::new(Vec::new(), Config::default()).unwrap();
    assert!(fuse.is_empty());
    assert!(fuse.search("apple").is_empty());
}

#[test]
fn test_no_match_far_off() {
    let fuse = fruit_index();
    assert!(fuse.search("zzzzzz").is_empty());
}

#[test]
fn test_score_and_matches_off_by_default() {
    let fuse = fruit_index();
    let results = fuse.search("apple");
    assert_eq!(results[0].score, None);
    assert_eq!(results[0].matches, None);
}

#[test]
fn test_search_is_repeatable() {
    let fuse = fruit_index();
    let first = ref_indices(&fuse.search("an"));
    for _ in 0..5 {
        assert_eq!(ref_indices(&fuse.search("an")), first);
    }
}

#[test]
fn test_large_corpus_ranks_like_small() {
    // Crosses the parallel threshold when that feature is on
    let items = numbered(3000);
    let fuse = Fuse::new(items, Config::default().include_score(true)).unwrap();

    let results = fuse.search("item 1234");
    assert_eq!(results[0].ref_index, 1234);
    assert_eq!(results[0].score, Some(0.0));
    assert_ranked(&results);
}
