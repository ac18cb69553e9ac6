// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for search query handling.
//!
//! Throws arbitrary queries at a small keyed index, in both plain and
//! extended mode, and checks the result invariants: bounded by the limit,
//! ranked best first, scores in [0, 1], every ref pointing at a live item.

#![no_main]

use arbitrary::Arbitrary;
use bitfuse::{Config, Fuse, SearchOptions};
use libfuzzer_sys::fuzz_target;
use serde_json::{json, Value};

#[derive(Debug, Arbitrary)]
struct QueryInput {
    query_bytes: Vec<u8>,
    extended: bool,
    case_sensitive: bool,
    ignore_diacritics: bool,
    limit: u8,
}

fn library() -> Vec<Value> {
    vec![
        json!({"title": "Old Man's War", "author": "John Scalzi", "tags": ["sf", "war"]}),
        json!({"title": "The Lock Artist", "author": "Steve Hamilton", "tags": ["crime"]}),
        json!({"title": "Café Society", "author": "Zoë Ångström", "tags": []}),
        json!({"title": "日本語のタイトル", "author": "山田 太郎", "tags": ["🦀", "emoji"]}),
        json!({"title": "   ", "author": null}),
        json!({"title": "x".repeat(300), "author": "Long Title"}),
    ]
}

fuzz_target!(|input: QueryInput| {
    let query: String = String::from_utf8_lossy(&input.query_bytes)
        .chars()
        .take(200)
        .collect();

    let config = Config::default()
        .with_keys([("title", 2.0), ("author", 1.0), ("tags", 0.5)])
        .extended_search(input.extended)
        .case_sensitive(input.case_sensitive)
        .ignore_diacritics(input.ignore_diacritics)
        .include_score(true)
        .include_matches(true);
    let fuse = Fuse::new(library(), config).expect("static config is valid");

    let limit = input.limit as usize;
    let results = fuse.search_with(&query, SearchOptions::limit(limit));

    // INVARIANT 1: Results are bounded by the limit
    assert!(results.len() <= limit);

    // INVARIANT 2: Best first, ties by ref
    for pair in results.windows(2) {
        let (a, b) = (pair[0].score.unwrap_or(0.0), pair[1].score.unwrap_or(0.0));
        assert!(a < b || (a == b && pair[0].ref_index < pair[1].ref_index));
    }

    for result in &results {
        // INVARIANT 3: Scores are in [0, 1]
        let score = result.score.expect("include_score is on");
        assert!((0.0..=1.0).contains(&score), "score {} out of range", score);

        // INVARIANT 4: Refs point at live items
        assert!(fuse.get(result.ref_index).is_some());

        // INVARIANT 5: Match ranges stay inside their strings
        for detail in result.matches.as_deref().unwrap_or_default() {
            let len = detail.value.chars().count();
            for range in &detail.ranges {
                assert!(range.start <= range.end && range.end < len);
            }
        }
    }
});
