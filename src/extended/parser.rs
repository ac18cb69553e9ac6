// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing for extended search.
//!
//! ```text
//! query  := group ( "|" group )*
//! group  := term ( " "+ term )*        spaces inside "..." don't split
//! term   := op? body | op? '"' body '"' suffix?
//! ```
//!
//! | Token        | Kind               | Matches when text...     |
//! |--------------|--------------------|--------------------------|
//! | `jscript`    | Fuzzy              | fuzzy-matches            |
//! | `=scheme`    | Exact              | equals                   |
//! | `'python`    | Include            | contains                 |
//! | `!ruby`      | InverseExact       | does not contain         |
//! | `^java`      | PrefixExact        | starts with              |
//! | `!^earlang`  | InversePrefixExact | does not start with      |
//! | `.js$`       | SuffixExact        | ends with                |
//! | `!.go$`      | InverseSuffixExact | does not end with        |
//!
//! Quoting keeps spaces in a body: `="old man"` or `'"war fic"`.

use super::matchers::TermKind;

/// Separates OR groups.
pub const OR_TOKEN: char = '|';

/// Recognition order. The first kind whose shape fits a token wins, and
/// quoted shapes are tried for every kind before bare ones.
const KIND_ORDER: [TermKind; 8] = [
    TermKind::Exact,
    TermKind::Include,
    TermKind::PrefixExact,
    TermKind::InversePrefixExact,
    TermKind::InverseSuffixExact,
    TermKind::SuffixExact,
    TermKind::InverseExact,
    TermKind::Fuzzy,
];

/// Operator prefix and suffix for each kind.
fn affixes(kind: TermKind) -> (&'static str, &'static str) {
    match kind {
        TermKind::Exact => ("=", ""),
        TermKind::Include => ("'", ""),
        TermKind::PrefixExact => ("^", ""),
        TermKind::InversePrefixExact => ("!^", ""),
        TermKind::InverseSuffixExact => ("!", "$"),
        TermKind::SuffixExact => ("", "$"),
        TermKind::InverseExact => ("!", ""),
        TermKind::Fuzzy => ("", ""),
    }
}

fn match_bare(kind: TermKind, token: &str) -> Option<&str> {
    let (prefix, suffix) = affixes(kind);
    let body = token.strip_prefix(prefix)?.strip_suffix(suffix)?;
    (!body.is_empty()).then_some(body)
}

fn match_quoted(kind: TermKind, token: &str) -> Option<&str> {
    let (prefix, suffix) = affixes(kind);
    let body = token
        .strip_prefix(prefix)?
        .strip_suffix(suffix)?
        .strip_prefix('"')?
        .strip_suffix('"')?;
    (!body.is_empty()).then_some(body)
}

/// Classify one token. Returns `None` only for tokens with no body at all.
pub fn classify(token: &str) -> Option<(TermKind, String)> {
    KIND_ORDER
        .iter()
        .find_map(|&kind| match_quoted(kind, token).map(|body| (kind, body)))
        .or_else(|| {
            KIND_ORDER
                .iter()
                .find_map(|&kind| match_bare(kind, token).map(|body| (kind, body)))
        })
        .map(|(kind, body)| (kind, body.to_string()))
}

/// Split a group on runs of spaces that sit outside double quotes.
pub fn split_terms(group: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in group.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ' ' if !in_quotes => {
                if start < i {
                    terms.push(&group[start..i]);
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < group.len() {
        terms.push(&group[start..]);
    }

    terms.retain(|term| !term.trim().is_empty());
    terms
}

/// Parse a whole query into OR groups of classified terms.
pub fn parse(query: &str) -> Vec<Vec<(TermKind, String)>> {
    query
        .split(OR_TOKEN)
        .map(|group| split_terms(group.trim()).into_iter().filter_map(classify).collect())
        .collect()
}
