// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The index: a collection, its records, and the search loop.
//!
//! Everything else in the crate feeds this. Keys were resolved into records
//! when items arrived; a query is compiled once; then every record is
//! matched, key by key, string by string, and the survivors are scored,
//! ranked and cut to the limit.
//!
//! ```
//! use bitfuse::{Config, Fuse};
//!
//! let fuse = Fuse::new(vec!["Apple", "Orange", "Banana"], Config::default()).unwrap();
//! let results = fuse.search("apple");
//! assert_eq!(results.len(), 1);
//! assert_eq!(*results[0].item, "Apple");
//! assert_eq!(results[0].ref_index, 0);
//! ```
//!
//! ## Reference indices
//!
//! Each item gets a `ref_index` when it is added: 0, 1, 2, ... in insertion
//! order. Removing items never renumbers the rest, and later additions keep
//! counting from where the index left off. Only `set_collection` starts over.

mod query;
pub mod shared;

pub use query::Query;

use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::Result;
use crate::index::{KeySlot, Record};
use crate::keys::{KeyStore, Searchable};
use crate::scoring::ranking::{rank, Ranked};
use crate::scoring::{aggregate_score, KeyScore};
use crate::types::{MatchDetail, SearchOptions, SearchResult};

/// Corpus size at which the scoring map moves onto the rayon pool.
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 2048;

/// An item with its reference index and precomputed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry<T> {
    pub ref_index: usize,
    pub item: T,
    pub record: Record,
}

/// A fuzzy search index over items of type `T`.
#[derive(Debug, Clone)]
pub struct Fuse<T> {
    /// Always sorted by `ref_index`.
    entries: Vec<Entry<T>>,
    next_ref: usize,
    config: Config,
    keys: KeyStore,
}

/// A match before it is turned into a `SearchResult`.
struct Hit<'a, T> {
    entry: &'a Entry<T>,
    score: f64,
    matches: Vec<MatchDetail>,
}

impl<T> Ranked for Hit<'_, T> {
    fn score(&self) -> f64 {
        self.score
    }

    fn ref_index(&self) -> usize {
        self.entry.ref_index
    }
}

impl<T: Searchable> Fuse<T> {
    /// Build an index. Fails if the config or its keys are invalid.
    pub fn new<I>(items: I, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let keys = config.validate()?;
        let mut fuse = Self {
            entries: Vec::new(),
            next_ref: 0,
            config,
            keys,
        };
        fuse.extend(items);
        debug!(
            items = fuse.entries.len(),
            keys = fuse.keys.len(),
            "built index"
        );
        Ok(fuse)
    }

    /// Add an item at the end of the collection and return its `ref_index`.
    pub fn add(&mut self, item: T) -> usize {
        let ref_index = self.next_ref;
        let record = Record::build(&item, &self.keys, self.config.field_norm_weight);
        self.entries.push(Entry {
            ref_index,
            item,
            record,
        });
        self.next_ref += 1;
        ref_index
    }

    /// Replace the whole collection. Reference indices restart at 0.
    pub fn set_collection<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.entries.clear();
        self.next_ref = 0;
        self.extend(items);
        debug!(items = self.entries.len(), "replaced collection");
    }

    fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.add(item);
        }
    }
}

impl<T> Fuse<T> {
    /// Remove every item the predicate selects, returning them in order.
    pub fn remove<F>(&mut self, mut predicate: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| predicate(&entry.item));
        self.entries = kept;
        removed.into_iter().map(|entry| entry.item).collect()
    }

    /// Remove the item with the given `ref_index`.
    pub fn remove_at(&mut self, ref_index: usize) -> Option<T> {
        let pos = self.position(ref_index)?;
        Some(self.entries.remove(pos).item)
    }

    pub fn get(&self, ref_index: usize) -> Option<&T> {
        self.position(ref_index).map(|pos| &self.entries[pos].item)
    }

    /// Items with their reference indices, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.entries.iter().map(|entry| (entry.ref_index, &entry.item))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Change what results report. Matching and stored records are untouched,
    /// so this is safe on a loaded snapshot.
    pub fn set_result_fields(&mut self, include_score: bool, include_matches: bool) {
        self.config.include_score = include_score;
        self.config.include_matches = include_matches;
    }

    pub fn keys(&self) -> &KeyStore {
        &self.keys
    }

    /// The `ref_index` the next added item will get.
    pub fn next_ref_index(&self) -> usize {
        self.next_ref
    }

    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    /// Reassemble an index from stored parts. Entries are put back in
    /// `ref_index` order and `next_ref` is raised past the largest one.
    pub(crate) fn from_parts(
        config: Config,
        keys: KeyStore,
        mut entries: Vec<Entry<T>>,
        next_ref: usize,
    ) -> Self {
        entries.sort_by_key(|entry| entry.ref_index);
        let floor = entries.last().map_or(0, |entry| entry.ref_index + 1);
        Self {
            entries,
            next_ref: next_ref.max(floor),
            config,
            keys,
        }
    }

    fn position(&self, ref_index: usize) -> Option<usize> {
        self.entries
            .binary_search_by_key(&ref_index, |entry| entry.ref_index)
            .ok()
    }
}

impl<T: Sync> Fuse<T> {
    /// Search with default options.
    pub fn search(&self, query: &str) -> Vec<SearchResult<'_, T>> {
        self.search_with(query, SearchOptions::default())
    }

    /// Search the collection.
    ///
    /// An empty query returns nothing. Results are ranked best first unless
    /// `should_sort` is off, then cut to `options.limit`.
    pub fn search_with(&self, query: &str, options: SearchOptions) -> Vec<SearchResult<'_, T>> {
        if query.is_empty() {
            return Vec::new();
        }

        let start = Instant::now();
        let compiled = Query::compile(query, &self.config);
        let mut hits = self.collect_hits(&compiled);
        let matched = hits.len();

        if self.config.should_sort {
            rank(&mut hits);
        }
        if let Some(limit) = options.limit {
            hits.truncate(limit);
        }

        trace!(
            query_len = query.chars().count(),
            candidates = self.entries.len(),
            matched,
            returned = hits.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "search"
        );

        hits.into_iter().map(|hit| self.to_result(hit)).collect()
    }

    #[cfg(feature = "parallel")]
    fn collect_hits<'a>(&'a self, query: &Query) -> Vec<Hit<'a, T>> {
        if self.entries.len() >= PARALLEL_THRESHOLD {
            self.entries
                .par_iter()
                .filter_map(|entry| self.evaluate(entry, query))
                .collect()
        } else {
            self.entries
                .iter()
                .filter_map(|entry| self.evaluate(entry, query))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn collect_hits<'a>(&'a self, query: &Query) -> Vec<Hit<'a, T>> {
        self.entries
            .iter()
            .filter_map(|entry| self.evaluate(entry, query))
            .collect()
    }

    fn to_result<'a>(&self, hit: Hit<'a, T>) -> SearchResult<'a, T> {
        SearchResult {
            item: &hit.entry.item,
            ref_index: hit.entry.ref_index,
            score: self.config.include_score.then_some(hit.score),
            matches: self.config.include_matches.then_some(hit.matches),
        }
    }
}

impl<T> Fuse<T> {
    /// Match one entry. `None` when no key matched, unless `include_all`
    /// keeps it with score 1.
    fn evaluate<'a>(&self, entry: &'a Entry<T>, query: &Query) -> Option<Hit<'a, T>> {
        let include_matches = self.config.include_matches;
        let mut key_scores = Vec::new();
        let mut matches = Vec::new();

        match &entry.record {
            Record::Blank => {}
            Record::Text(field) => {
                let result = query.search_in(&field.text);
                if result.is_match {
                    key_scores.push(KeyScore {
                        score: result.score,
                        weight: None,
                        norm: field.norm,
                    });
                    if include_matches && !result.ranges.is_empty() {
                        matches.push(MatchDetail {
                            key: None,
                            value: field.text.clone(),
                            ref_index: None,
                            ranges: result.ranges,
                        });
                    }
                }
            }
            Record::Keyed(slots) => {
                for (key, slot) in self.keys.keys().iter().zip(slots) {
                    let mut best: Option<KeyScore> = None;

                    for field in slot.fields() {
                        let result = query.search_in(&field.text);
                        if !result.is_match {
                            continue;
                        }
                        if best.map_or(true, |b| result.score < b.score) {
                            best = Some(KeyScore {
                                score: result.score,
                                weight: Some(key.weight),
                                norm: field.norm,
                            });
                        }
                        if include_matches && !result.ranges.is_empty() {
                            matches.push(MatchDetail {
                                key: Some(key.id.clone()),
                                value: field.text.clone(),
                                ref_index: match slot {
                                    KeySlot::List(_) => field.position,
                                    _ => None,
                                },
                                ranges: result.ranges,
                            });
                        }
                    }

                    key_scores.extend(best);
                }
            }
        }

        if key_scores.is_empty() && !self.config.include_all {
            return None;
        }

        Some(Hit {
            entry,
            score: aggregate_score(&key_scores, self.config.ignore_field_norm),
            matches,
        })
    }
}
