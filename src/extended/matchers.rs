// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Term matchers. All of them work on folded text.
//!
//! Every exact-style term scores 0 when it holds and misses otherwise. Only
//! fuzzy terms produce graded scores.

use crate::fuzzy::{MatchOptions, MatchResult, Pattern};
use crate::types::MatchRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    Fuzzy,
    Exact,
    Include,
    PrefixExact,
    InversePrefixExact,
    SuffixExact,
    InverseSuffixExact,
    InverseExact,
}

impl TermKind {
    /// Inverse terms hold when something is absent.
    pub fn is_inverse(self) -> bool {
        matches!(
            self,
            TermKind::InversePrefixExact | TermKind::InverseSuffixExact | TermKind::InverseExact
        )
    }
}

/// One parsed term with its folded body.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub kind: TermKind,
    body: Vec<char>,
    fuzzy: Option<Pattern>,
}

impl Term {
    /// `body` must already be folded with `options.folding`.
    pub fn new(kind: TermKind, body: &str, options: &MatchOptions) -> Self {
        let fuzzy = (kind == TermKind::Fuzzy).then(|| Pattern::compile(body, *options));
        Self {
            kind,
            body: body.chars().collect(),
            fuzzy,
        }
    }

    pub fn body(&self) -> &[char] {
        &self.body
    }

    pub fn search(&self, text: &[char]) -> MatchResult {
        let body = self.body.as_slice();
        let held = match self.kind {
            TermKind::Fuzzy => {
                return match &self.fuzzy {
                    Some(pattern) => pattern.search_folded(text),
                    None => MatchResult::miss(),
                };
            }
            TermKind::Exact => (text == body).then(|| whole(text)),
            TermKind::Include => {
                let ranges = occurrences(text, body);
                (!ranges.is_empty()).then_some(ranges)
            }
            TermKind::PrefixExact => text
                .starts_with(body)
                .then(|| vec![MatchRange::new(0, body.len() - 1)]),
            TermKind::SuffixExact => text
                .ends_with(body)
                .then(|| vec![MatchRange::new(text.len() - body.len(), text.len() - 1)]),
            TermKind::InversePrefixExact => (!text.starts_with(body)).then(|| whole(text)),
            TermKind::InverseSuffixExact => (!text.ends_with(body)).then(|| whole(text)),
            TermKind::InverseExact => occurrences(text, body).is_empty().then(|| whole(text)),
        };

        match held {
            Some(ranges) => MatchResult {
                is_match: true,
                score: 0.0,
                ranges,
            },
            None => MatchResult::miss(),
        }
    }
}

fn whole(text: &[char]) -> Vec<MatchRange> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![MatchRange::new(0, text.len() - 1)]
    }
}

/// Non-overlapping occurrences of `needle`, left to right.
fn occurrences(text: &[char], needle: &[char]) -> Vec<MatchRange> {
    let mut ranges = Vec::new();
    if needle.is_empty() || needle.len() > text.len() {
        return ranges;
    }

    let mut i = 0;
    while i + needle.len() <= text.len() {
        if text[i..i + needle.len()] == *needle {
            ranges.push(MatchRange::new(i, i + needle.len() - 1));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}
