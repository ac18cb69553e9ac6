// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A query compiled for one index's settings.

use crate::config::Config;
use crate::extended::ExtendedQuery;
use crate::fuzzy::{MatchResult, Pattern};

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Fuzzy(Pattern),
    Extended(ExtendedQuery),
}

impl Query {
    pub fn compile(query: &str, config: &Config) -> Self {
        let options = config.match_options();
        if config.use_extended_search {
            Query::Extended(ExtendedQuery::parse(query, options))
        } else {
            Query::Fuzzy(Pattern::compile(query, options))
        }
    }

    pub fn search_in(&self, text: &str) -> MatchResult {
        match self {
            Query::Fuzzy(pattern) => pattern.search_in(text),
            Query::Extended(query) => query.search_in(text),
        }
    }
}
