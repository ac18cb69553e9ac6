// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index configuration.
//!
//! One struct, every option spelled out, every option defaulted. Options are
//! fixed for the lifetime of an index; build a new one to change them.
//!
//! Deserializes from camelCase JSON with any subset of fields:
//!
//! ```
//! let config = bitfuse::Config::from_json_str(
//!     r#"{"keys": [{"name": "title", "weight": 0.3}, "author"], "threshold": 0.4}"#,
//! ).unwrap();
//! assert_eq!(config.threshold, 0.4);
//! assert_eq!(config.distance, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{FuseError, Result};
use crate::fuzzy::MatchOptions;
use crate::keys::{KeySpec, KeyStore};
use crate::util::normalize::Folding;

/// Default maximum match score.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Default proximity decay, in chars.
pub const DEFAULT_DISTANCE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Fields to search. Ignored for plain string items.
    pub keys: Vec<KeySpec>,
    /// Highest per-string score that counts as a match (0 = exact, 1 = anything).
    pub threshold: f64,
    /// Char index where matches are expected.
    pub location: usize,
    /// How far from `location` a match may drift before scoring 1.
    pub distance: usize,
    /// Score matches by edit ratio only.
    pub ignore_location: bool,
    pub include_score: bool,
    pub include_matches: bool,
    pub is_case_sensitive: bool,
    /// Fold accented chars to their base char ("é" → "e").
    pub ignore_diacritics: bool,
    /// Shortest run of matched chars that counts (and gets highlighted).
    pub min_match_char_length: usize,
    /// Keep scanning past a good match to mark every matching char.
    pub find_all_matches: bool,
    /// Rank results by score. When off, results come in insertion order.
    pub should_sort: bool,
    /// Don't penalize matches in long fields.
    pub ignore_field_norm: bool,
    /// Strength of the long-field penalty.
    pub field_norm_weight: f64,
    /// Parse queries with the extended operator syntax.
    pub use_extended_search: bool,
    /// Return items that matched nothing too, scored 1 and ranked last.
    pub include_all: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            threshold: DEFAULT_THRESHOLD,
            location: 0,
            distance: DEFAULT_DISTANCE,
            ignore_location: false,
            include_score: false,
            include_matches: false,
            is_case_sensitive: false,
            ignore_diacritics: false,
            min_match_char_length: 1,
            find_all_matches: false,
            should_sort: true,
            ignore_field_norm: false,
            field_norm_weight: 1.0,
            use_extended_search: false,
            include_all: false,
        }
    }
}

impl Config {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every option and return the validated key store.
    pub fn validate(&self) -> Result<KeyStore> {
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            return Err(FuseError::InvalidThreshold(self.threshold));
        }
        if !(self.field_norm_weight.is_finite() && self.field_norm_weight >= 0.0) {
            return Err(FuseError::InvalidFieldNormWeight(self.field_norm_weight));
        }
        KeyStore::new(&self.keys)
    }

    /// How text is folded before matching.
    pub fn folding(&self) -> Folding {
        Folding {
            case_sensitive: self.is_case_sensitive,
            ignore_diacritics: self.ignore_diacritics,
        }
    }

    /// The matcher's slice of the config.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            location: self.location,
            distance: self.distance,
            threshold: self.threshold,
            ignore_location: self.ignore_location,
            find_all_matches: self.find_all_matches,
            min_match_char_length: self.min_match_char_length.max(1),
            include_matches: self.include_matches,
            folding: self.folding(),
        }
    }

    // Builders

    pub fn with_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<KeySpec>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_location(mut self, location: usize) -> Self {
        self.location = location;
        self
    }

    pub fn with_distance(mut self, distance: usize) -> Self {
        self.distance = distance;
        self
    }

    pub fn ignore_location(mut self, ignore: bool) -> Self {
        self.ignore_location = ignore;
        self
    }

    pub fn include_score(mut self, include: bool) -> Self {
        self.include_score = include;
        self
    }

    pub fn include_matches(mut self, include: bool) -> Self {
        self.include_matches = include;
        self
    }

    pub fn case_sensitive(mut self, sensitive: bool) -> Self {
        self.is_case_sensitive = sensitive;
        self
    }

    pub fn ignore_diacritics(mut self, ignore: bool) -> Self {
        self.ignore_diacritics = ignore;
        self
    }

    pub fn with_min_match_char_length(mut self, len: usize) -> Self {
        self.min_match_char_length = len;
        self
    }

    pub fn find_all_matches(mut self, find_all: bool) -> Self {
        self.find_all_matches = find_all;
        self
    }

    pub fn should_sort(mut self, sort: bool) -> Self {
        self.should_sort = sort;
        self
    }

    pub fn ignore_field_norm(mut self, ignore: bool) -> Self {
        self.ignore_field_norm = ignore;
        self
    }

    pub fn with_field_norm_weight(mut self, weight: f64) -> Self {
        self.field_norm_weight = weight;
        self
    }

    pub fn extended_search(mut self, extended: bool) -> Self {
        self.use_extended_search = extended;
        self
    }

    pub fn include_all(mut self, include: bool) -> Self {
        self.include_all = include;
        self
    }
}
