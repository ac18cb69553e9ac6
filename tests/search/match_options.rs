//! Matcher options seen through the index.

use crate::common::*;
use bitfuse::{Config, Fuse, MatchRange};

#[test]
fn test_case_insensitive_by_default() {
    let fuse = fruit_index();
    assert_eq!(fuse.search("APPLE")[0].item, "Apple");
}

#[test]
fn test_case_sensitive() {
    let items = vec!["Apple", "apple"];
    let fuse = Fuse::new(items, Config::default().case_sensitive(true).include_score(true)).unwrap();
    let results = fuse.search("Apple");
    assert_eq!(*results[0].item, "Apple");
    assert_eq!(results[0].score, Some(0.0));
    // "apple" still fuzzy-matches with one substitution
    assert!(results[1].score.unwrap() > 0.0);
}

#[test]
fn test_diacritics_ignored_when_asked() {
    let items = vec!["Café Noir", "Cafe Society"];
    let strict = Fuse::new(items.clone(), Config::default().include_score(true)).unwrap();
    let loose = Fuse::new(
        items,
        Config::default().ignore_diacritics(true).include_score(true),
    )
    .unwrap();

    assert_eq!(*loose.search("cafe noir")[0].item, "Café Noir");
    assert_eq!(loose.search("cafe noir")[0].score, Some(0.0));
    assert!(strict.search("cafe noir")[0].score.unwrap() > 0.0);
}

#[test]
fn test_location_and_distance() {
    let text = format!("{}needle", "x".repeat(50));
    let items = vec![text.clone()];

    let near = Fuse::new(items.clone(), Config::default().with_distance(10)).unwrap();
    assert!(near.search("needle").is_empty());

    let wide = Fuse::new(items.clone(), Config::default()).unwrap();
    assert_eq!(wide.search("needle").len(), 1);

    let located = Fuse::new(
        items.clone(),
        Config::default().with_location(50).with_distance(10),
    )
    .unwrap();
    assert_eq!(located.search("needle").len(), 1);

    let anywhere = Fuse::new(
        items,
        Config::default().with_distance(1).ignore_location(true),
    )
    .unwrap();
    assert_eq!(anywhere.search("needle").len(), 1);
}

#[test]
fn test_threshold_zero_needs_perfect_match() {
    let fuse = Fuse::new(fruits(), Config::default().with_threshold(0.0)).unwrap();
    assert!(fuse.search("aple").is_empty());
    assert_eq!(fuse.search("apple").len(), 1);
}

#[test]
fn test_threshold_one_is_lenient() {
    let strict = Fuse::new(fruits(), Config::default()).unwrap();
    let lenient = Fuse::new(fruits(), Config::default().with_threshold(1.0)).unwrap();
    assert!(lenient.search("grape").len() >= strict.search("grape").len());
    assert!(!lenient.search("grape").is_empty());
}

#[test]
fn test_include_matches_ranges() {
    let fuse = Fuse::new(fruits(), Config::default().include_matches(true)).unwrap();
    let results = fuse.search("apple");
    let matches = results[0].matches.as_ref().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].key, None);
    assert_eq!(matches[0].value, "Apple");
    assert_eq!(matches[0].ranges, vec![MatchRange::new(0, 4)]);
}

#[test]
fn test_include_matches_substring() {
    let fuse = Fuse::new(vec!["a banana"], Config::default().include_matches(true)).unwrap();
    let results = fuse.search("nan");
    let ranges = &results[0].matches.as_ref().unwrap()[0].ranges;
    assert!(ranges.iter().any(|r| r.start <= 4 && r.end >= 6));
    for range in ranges {
        assert!(range.start <= range.end && range.end < 8);
    }
}

#[test]
fn test_min_match_char_length() {
    let items = vec!["nan", "banana split"];
    let config = Config::default()
        .with_min_match_char_length(4)
        .include_matches(true);
    let fuse = Fuse::new(items, config).unwrap();
    let found: Vec<&str> = fuse.search("nana").iter().map(|r| *r.item).collect();
    assert_eq!(found, vec!["banana split"]);
    for result in fuse.search("nana") {
        for detail in result.matches.as_ref().unwrap() {
            assert!(detail.ranges.iter().all(|r| r.len() >= 4));
        }
    }
}

#[test]
fn test_find_all_matches_keeps_score() {
    let text = "a needle and another needle";
    let base = Fuse::new(vec![text], Config::default().include_score(true)).unwrap();
    let all = Fuse::new(
        vec![text],
        Config::default().include_score(true).find_all_matches(true),
    )
    .unwrap();
    assert_eq!(base.search("needle")[0].score, all.search("needle")[0].score);
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "keys": ["title", {"name": "author", "weight": 2}],
        "threshold": 0.4,
        "includeScore": true
    }"#;
    let config = Config::from_json_str(json).unwrap();
    assert_eq!(config.threshold, 0.4);
    assert!(config.include_score);

    let fuse = book_index(config);
    assert!((fuse.keys().get("author").unwrap().weight - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_config_from_json_rejects_bad_values() {
    assert!(Config::from_json_str(r#"{"threshold": -1}"#).is_err());
    assert!(Config::from_json_str(r#"{"keys": [{"name": "a", "weight": 0}]}"#).is_err());
    assert!(Config::from_json_str("not json").is_err());
}

#[test]
fn test_far_location_with_long_query() {
    let long = "a".repeat(70);
    let items = vec!["hello".to_string(), long.clone()];
    let fuse = Fuse::new(
        items,
        Config::default().with_location(usize::MAX).include_score(true),
    )
    .unwrap();
    let results = fuse.search(&long);
    assert_eq!(ref_indices(&results), vec![1]);
    assert_eq!(results[0].score, Some(0.0));
}
