// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text folding for matching: case and diacritics.
//!
//! Folding is strictly char-to-char. Every input char produces exactly one
//! output char, so a match range computed on folded text points at the same
//! chars in the original. That's what makes highlighting work without a
//! position map.
//!
//! - "Café" → "cafe" (with `ignore_diacritics`)
//! - "İstanbul" → "istanbul" (first char of the lowercase expansion)

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// How text is folded before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Folding {
    pub case_sensitive: bool,
    pub ignore_diacritics: bool,
}

impl Folding {
    /// Fold a single char.
    #[inline]
    pub fn fold_char(self, c: char) -> char {
        let c = if self.ignore_diacritics {
            strip_diacritic(c)
        } else {
            c
        };
        if self.case_sensitive {
            c
        } else {
            c.to_lowercase().next().unwrap_or(c)
        }
    }

    /// Fold a whole string into chars, one output char per input char.
    pub fn fold(self, text: &str) -> Vec<char> {
        text.chars().map(|c| self.fold_char(c)).collect()
    }

    /// Fold a string and collect it back into a `String`.
    pub fn fold_str(self, text: &str) -> String {
        text.chars().map(|c| self.fold_char(c)).collect()
    }
}

/// Base char of an accented char: 'é' → 'e'. Marks on their own are kept.
#[cfg(feature = "unicode-normalization")]
fn strip_diacritic(c: char) -> char {
    if c.is_ascii() {
        return c;
    }
    std::iter::once(c)
        .nfd()
        .find(|d| !is_combining_mark(*d))
        .unwrap_or(c)
}

/// Without the normalization tables there is nothing to strip.
#[cfg(not(feature = "unicode-normalization"))]
fn strip_diacritic(c: char) -> char {
    c
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// True when the text has no non-whitespace chars.
#[inline]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
