//! Shared test utilities and fixtures.

#![allow(dead_code)]

use bitfuse::{Config, Fuse, KeySpec, SearchResult};

// Re-export canonical fixtures from bitfuse::testing
pub use bitfuse::testing::{book_values, books, fruits, nested_books, Author, Book, NestedBook};

// ============================================================================
// INDEXES
// ============================================================================

/// `["Apple", "Orange", "Banana"]` with default options.
pub fn fruit_index() -> Fuse<String> {
    Fuse::new(fruits(), Config::default()).expect("default config is valid")
}

/// The title 0.3 / author 0.7 weighting.
pub fn weighted_book_config() -> Config {
    Config::default().with_keys([
        KeySpec::weighted("title", 0.3),
        KeySpec::weighted("author", 0.7),
    ])
}

pub fn book_index(config: Config) -> Fuse<Book> {
    Fuse::new(books(), config).expect("book config is valid")
}

/// `count` distinct strings: "item 0", "item 1", ...
pub fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("item {}", i)).collect()
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

pub fn ref_indices<T>(results: &[SearchResult<'_, T>]) -> Vec<usize> {
    results.iter().map(|r| r.ref_index).collect()
}

pub fn scores<T>(results: &[SearchResult<'_, T>]) -> Vec<f64> {
    results
        .iter()
        .map(|r| r.score.expect("index built with include_score"))
        .collect()
}

/// Scores are non-decreasing and ties are in ref_index order.
pub fn assert_ranked<T>(results: &[SearchResult<'_, T>]) {
    for pair in results.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let (sa, sb) = (a.score.unwrap_or(0.0), b.score.unwrap_or(0.0));
        assert!(
            sa < sb || (sa == sb && a.ref_index < b.ref_index),
            "out of order: #{} ({}) before #{} ({})",
            a.ref_index,
            sa,
            b.ref_index,
            sb
        );
    }
}
