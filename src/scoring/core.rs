// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind the aggregate score.
//!
//! Each matched key contributes a factor `score ^ (weight · norm)`, and the
//! item's score is the product of those factors. Because every factor is in
//! `[0, 1]`, matching more keys can only help, and the exponent decides how
//! much a key's match counts:
//!
//! - a heavier key has a bigger exponent, so a good score on it pulls the
//!   product down harder;
//! - a longer field has a smaller norm, so the same score counts for less.
//!
//! An exact match (score 0) on a weighted key would zero the product no
//! matter the weight, which would make a 0.3 key tie a 0.7 key. Exact matches
//! on weighted keys therefore use `f64::EPSILON` instead, and the weight keeps
//! its say: `ε^0.7 < ε^0.3`.
//!
//! # Key property: weight dominance
//!
//! With the same field length and nothing else matching, an exact match on a
//! key of weight `w1` beats an exact match on a key of weight `w2 < w1`:
//! `ε^(w1·n) < ε^(w2·n)`. Extra matched keys multiply in factors ≤ 1, but a
//! fuzzy factor is at least `0.001^(w·n)`, far above `ε`'s scale, so they
//! rarely close that gap.

/// Decimal places kept in a field norm.
pub const NORM_MANTISSA: i32 = 3;

/// Stand-in for a zero score on a weighted key.
pub const EXACT_MATCH_FLOOR: f64 = f64::EPSILON;

/// Length penalty for a field: `1 / tokens^(0.5 · weight)`, 3 decimals.
///
/// Tokens are runs of non-space chars. One token → 1.0, four → 0.5.
/// A `weight` of 0 disables the penalty.
pub fn field_norm(text: &str, weight: f64) -> f64 {
    let tokens = text.split(' ').filter(|t| !t.is_empty()).count().max(1);
    let norm = 1.0 / (tokens as f64).powf(0.5 * weight);
    let scale = 10f64.powi(NORM_MANTISSA);
    (norm * scale).round() / scale
}

/// One matched key's input to the aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyScore {
    /// Best match score for the key, in `[0, 1]`.
    pub score: f64,
    /// Normalized key weight, or `None` for plain string items.
    pub weight: Option<f64>,
    /// Field norm of the string that produced `score`.
    pub norm: f64,
}

/// Combine matched keys into one score: `Π score ^ (weight · norm)`.
///
/// Keys that didn't match must not be passed in. An empty slice scores 1.
pub fn aggregate_score(keys: &[KeyScore], ignore_field_norm: bool) -> f64 {
    if keys.is_empty() {
        return 1.0;
    }

    keys.iter().fold(1.0, |total, key| {
        let base = match key.weight {
            Some(_) if key.score == 0.0 => EXACT_MATCH_FLOOR,
            _ => key.score,
        };
        let norm = if ignore_field_norm { 1.0 } else { key.norm };
        total * base.powf(key.weight.unwrap_or(1.0) * norm)
    })
}
