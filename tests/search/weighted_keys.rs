//! Keyed records: weights, field norm, and key validation.

use crate::common::*;
use bitfuse::{Config, Fuse, FuseError, KeySpec};

#[test]
fn test_weights_normalize_to_one() {
    let fuse = book_index(weighted_book_config());
    let total: f64 = fuse.keys().keys().iter().map(|k| k.weight).sum();
    assert!((total - 1.0).abs() < 1e-12);
    assert!((fuse.keys().get("author").unwrap().weight - 0.7).abs() < 1e-12);
}

#[test]
fn test_unweighted_keys_share_equally() {
    let fuse = book_index(Config::default().with_keys(["title", "author", "tags"]));
    for key in fuse.keys().keys() {
        assert!((key.weight - 1.0 / 3.0).abs() < 1e-12);
    }
}

#[test]
fn test_author_weight_wins() {
    let fuse = book_index(weighted_book_config().include_score(true));
    let results = fuse.search("John Smith");
    assert_eq!(results[0].ref_index, 2);
    assert_eq!(results[0].item.author, "John Smith");
}

#[test]
fn test_title_weight_wins() {
    let config = Config::default()
        .with_keys([KeySpec::weighted("title", 0.7), KeySpec::weighted("author", 0.3)])
        .include_score(true);
    let fuse = book_index(config);
    let results = fuse.search("John Smith");
    assert_eq!(results[0].ref_index, 3);
    assert_eq!(results[0].item.title, "John Smith");
}

#[test]
fn test_exact_keyed_match_is_tiny_not_zero() {
    let fuse = book_index(weighted_book_config().include_score(true));
    let score = fuse.search("John Smith")[0].score.unwrap();
    assert!(score > 0.0);
    assert!(score < 1e-3);
}

#[test]
fn test_shorter_field_ranks_higher() {
    let items = vec![
        serde_json::json!({ "text": "fox jumps over the lazy dog" }),
        serde_json::json!({ "text": "fox den" }),
    ];
    let fuse = Fuse::new(items, Config::default().with_keys(["text"]).include_score(true)).unwrap();
    let results = fuse.search("fox");
    assert_eq!(ref_indices(&results), vec![1, 0]);
}

#[test]
fn test_ignore_field_norm_ties_on_equal_matches() {
    let items = vec![
        serde_json::json!({ "text": "fox and friends" }),
        serde_json::json!({ "text": "fox" }),
    ];
    let config = Config::default()
        .with_keys(["text"])
        .include_score(true)
        .ignore_field_norm(true);
    let fuse = Fuse::new(items, config).unwrap();
    let results = fuse.search("fo");
    assert_eq!(results.len(), 2);
    let s = scores(&results);
    assert_eq!(s[0], s[1]);
    // Ties fall back to insertion order
    assert_eq!(ref_indices(&results), vec![0, 1]);
}

#[test]
fn test_zero_weight_rejected() {
    let config = Config::default().with_keys([KeySpec::weighted("title", 0.0)]);
    let err = Fuse::new(books(), config).unwrap_err();
    assert!(matches!(err, FuseError::InvalidKeyWeight { .. }));
}

#[test]
fn test_negative_and_nan_weights_rejected() {
    for weight in [-1.0, f64::NAN, f64::INFINITY] {
        let config = Config::default().with_keys([KeySpec::weighted("title", weight)]);
        assert!(Fuse::new(books(), config).is_err(), "weight {} accepted", weight);
    }
}

#[test]
fn test_empty_key_path_rejected() {
    for path in ["", "author..name", "title."] {
        let config = Config::default().with_keys([path]);
        let err = Fuse::new(books(), config).unwrap_err();
        assert!(matches!(err, FuseError::EmptyKeyPath { .. }), "{:?} accepted", path);
    }
}

#[test]
fn test_invalid_threshold_rejected() {
    let config = Config::default().with_threshold(-0.5);
    assert!(matches!(
        Fuse::new(fruits(), config).unwrap_err(),
        FuseError::InvalidThreshold(_)
    ));
}

#[test]
fn test_matches_report_their_key() {
    let fuse = book_index(weighted_book_config().include_matches(true));
    let results = fuse.search("Jeeves");
    let jeeves = results.iter().find(|r| r.ref_index == 1).unwrap();
    let matches = jeeves.matches.as_ref().unwrap();
    assert!(matches.iter().any(|m| m.key.as_deref() == Some("title")));
    assert!(matches.iter().all(|m| !m.ranges.is_empty()));
}

#[test]
fn test_include_all_scores_unmatched_records_one() {
    let config = weighted_book_config().include_all(true).include_score(true);
    let fuse = book_index(config);
    let results = fuse.search("zzzzzzzzzzzz");
    assert_eq!(ref_indices(&results), vec![0, 1, 2, 3]);
    assert!(scores(&results).iter().all(|&s| s == 1.0));
    assert!(results.iter().all(|r| r.matches.is_none()));
}
