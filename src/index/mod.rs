// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-item records: everything a search needs, resolved once.
//!
//! Key paths are walked when an item is added, never during a search. A
//! `Record` keeps the strings each key produced together with their field
//! norms, so scoring an item is just matching strings and multiplying.
//!
//! Blank strings (empty or whitespace only) are dropped here. They can never
//! match a real query, and dropping them keeps the record small. List
//! elements remember their position in the original array so matches can
//! point back at the element.

use serde::{Deserialize, Serialize};

use crate::keys::{FieldValue, KeyStore, Searchable};
use crate::scoring::field_norm;
use crate::util::normalize::is_blank;

/// One searchable string with its length penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub text: String,
    pub norm: f64,
    /// Index inside the array the string came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl Field {
    fn new(text: String, position: Option<usize>, norm_weight: f64) -> Self {
        let norm = field_norm(&text, norm_weight);
        Self {
            text,
            norm,
            position,
        }
    }
}

/// What one key produced for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum KeySlot {
    Missing,
    Single(Field),
    /// Non-empty; a list with no usable strings is stored as `Missing`.
    List(Vec<Field>),
}

impl KeySlot {
    fn from_value(value: FieldValue, norm_weight: f64) -> Self {
        match value {
            FieldValue::Missing => KeySlot::Missing,
            FieldValue::Text(text) if is_blank(&text) => KeySlot::Missing,
            FieldValue::Text(text) => KeySlot::Single(Field::new(text, None, norm_weight)),
            FieldValue::List(texts) => {
                let fields: Vec<Field> = texts
                    .into_iter()
                    .enumerate()
                    .filter(|(_, text)| !is_blank(text))
                    .map(|(i, text)| Field::new(text, Some(i), norm_weight))
                    .collect();
                if fields.is_empty() {
                    KeySlot::Missing
                } else {
                    KeySlot::List(fields)
                }
            }
        }
    }

    /// Strings in this slot, in array order.
    pub fn fields(&self) -> &[Field] {
        match self {
            KeySlot::Missing => &[],
            KeySlot::Single(field) => std::slice::from_ref(field),
            KeySlot::List(fields) => fields,
        }
    }
}

/// The precomputed form of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Record {
    /// A plain string item.
    Text(Field),
    /// A structured item: one slot per key, in key order.
    Keyed(Vec<KeySlot>),
    /// Nothing searchable. Stays in the collection, never matches.
    Blank,
}

impl Record {
    /// Resolve an item against the index keys.
    ///
    /// Items that answer `as_text` are plain strings and ignore the keys.
    /// Anything else with no keys configured has nothing to search.
    pub fn build<T: Searchable + ?Sized>(item: &T, keys: &KeyStore, norm_weight: f64) -> Self {
        if let Some(text) = item.as_text() {
            return if is_blank(&text) {
                Record::Blank
            } else {
                Record::Text(Field::new(text.into_owned(), None, norm_weight))
            };
        }

        if keys.is_empty() {
            return Record::Blank;
        }

        let slots: Vec<KeySlot> = keys
            .keys()
            .iter()
            .map(|key| KeySlot::from_value(item.resolve(&key.path), norm_weight))
            .collect();

        if slots.iter().all(|slot| matches!(slot, KeySlot::Missing)) {
            Record::Blank
        } else {
            Record::Keyed(slots)
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Record::Blank)
    }

    /// Total number of strings held.
    pub fn field_count(&self) -> usize {
        match self {
            Record::Text(_) => 1,
            Record::Keyed(slots) => slots.iter().map(|slot| slot.fields().len()).sum(),
            Record::Blank => 0,
        }
    }
}
