// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Extended search: a small operator language on top of fuzzy matching.
//!
//! A query is a list of OR groups (`|`), each a list of AND terms (spaces).
//! A string matches a group when every term in it holds; the first group
//! that matches wins, and its score is the mean of its term scores.
//!
//! ```
//! use bitfuse::{ExtendedQuery, MatchOptions};
//!
//! let query = ExtendedQuery::parse("^main !test | .md$", MatchOptions::default());
//! assert!(query.search_in("main.rs").is_match);
//! assert!(!query.search_in("main_test.rs").is_match);
//! assert!(query.search_in("README.md").is_match);
//! ```

mod matchers;
mod parser;

pub use matchers::{Term, TermKind};
pub use parser::OR_TOKEN;

use crate::fuzzy::{MatchOptions, MatchResult};

/// A parsed extended query.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedQuery {
    groups: Vec<Vec<Term>>,
    options: MatchOptions,
}

impl ExtendedQuery {
    /// Parse a query. The query is folded before operators are read, so
    /// bodies compare against folded text.
    pub fn parse(query: &str, options: MatchOptions) -> Self {
        let folded = options.folding.fold_str(query);
        let groups = parser::parse(&folded)
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|(kind, body)| Term::new(kind, &body, &options))
                    .collect()
            })
            .collect();
        Self { groups, options }
    }

    pub fn groups(&self) -> &[Vec<Term>] {
        &self.groups
    }

    /// True when no group has any term; such a query matches nothing.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    pub fn search_in(&self, text: &str) -> MatchResult {
        let folded = self.options.folding.fold(text);
        self.search_folded(&folded)
    }

    pub fn search_folded(&self, text: &[char]) -> MatchResult {
        'groups: for group in self.groups.iter().filter(|g| !g.is_empty()) {
            let mut total = 0.0;
            let mut ranges = Vec::new();

            for term in group {
                let result = term.search(text);
                if !result.is_match {
                    continue 'groups;
                }
                total += result.score;
                if self.options.include_matches {
                    ranges.extend(result.ranges);
                }
            }

            return MatchResult {
                is_match: true,
                score: total / group.len() as f64,
                ranges,
            };
        }
        MatchResult::miss()
    }
}
