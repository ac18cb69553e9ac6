// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Keys: which fields of an item get searched, and how much each one counts.
//!
//! A key is given as a dotted path (`"author.firstName"`), as explicit
//! segments (`["author", "first.name"]`, for field names that contain dots),
//! or as either of those with a weight. `KeyStore` validates the lot once at
//! construction and normalizes weights so they sum to 1.
//!
//! Resolving a key against an item is the `Searchable` trait's job (see
//! `accessor`). This module only deals with the key descriptions.

mod accessor;

pub use accessor::{resolve_serialized, resolve_value, FieldValue, Searchable};

use serde::{Deserialize, Serialize};

use crate::error::{FuseError, Result};

/// A key path: dotted string or explicit segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyName {
    /// Split on `.` into segments.
    Path(String),
    /// Taken as-is; segments may contain dots.
    Segments(Vec<String>),
}

impl KeyName {
    fn segments(&self) -> Vec<String> {
        match self {
            KeyName::Path(path) => path.split('.').map(str::to_string).collect(),
            KeyName::Segments(segments) => segments.clone(),
        }
    }

    fn display(&self) -> String {
        match self {
            KeyName::Path(path) => path.clone(),
            KeyName::Segments(segments) => segments.join("."),
        }
    }
}

/// One entry of `Config::keys`.
///
/// Deserializes from `"title"`, `["author", "name"]`, or
/// `{"name": "title", "weight": 0.3}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeySpec {
    Name(KeyName),
    Weighted {
        name: KeyName,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weight: Option<f64>,
    },
}

impl KeySpec {
    /// A dotted path with a weight.
    pub fn weighted(path: impl Into<String>, weight: f64) -> Self {
        KeySpec::Weighted {
            name: KeyName::Path(path.into()),
            weight: Some(weight),
        }
    }

    /// A path given as explicit segments (no dot splitting).
    pub fn segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeySpec::Name(KeyName::Segments(
            segments.into_iter().map(Into::into).collect(),
        ))
    }

    fn name(&self) -> &KeyName {
        match self {
            KeySpec::Name(name) | KeySpec::Weighted { name, .. } => name,
        }
    }

    fn weight(&self) -> Option<f64> {
        match self {
            KeySpec::Name(_) => None,
            KeySpec::Weighted { weight, .. } => *weight,
        }
    }
}

impl From<&str> for KeySpec {
    fn from(path: &str) -> Self {
        KeySpec::Name(KeyName::Path(path.to_string()))
    }
}

impl From<String> for KeySpec {
    fn from(path: String) -> Self {
        KeySpec::Name(KeyName::Path(path))
    }
}

impl From<(&str, f64)> for KeySpec {
    fn from((path, weight): (&str, f64)) -> Self {
        KeySpec::weighted(path, weight)
    }
}

/// A validated key with its normalized weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    /// Segments joined with `.`; used to label matches.
    pub id: String,
    pub path: Vec<String>,
    /// Normalized: all weights in a `KeyStore` sum to 1.
    pub weight: f64,
}

/// The validated, weight-normalized key list of an index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyStore {
    keys: Vec<Key>,
}

impl KeyStore {
    /// Validate specs and normalize weights.
    ///
    /// Fails on an empty path, an empty segment, or a weight that is not a
    /// finite number greater than zero.
    pub fn new(specs: &[KeySpec]) -> Result<Self> {
        let mut keys = Vec::with_capacity(specs.len());
        let mut total_weight = 0.0;

        for spec in specs {
            let name = spec.name();
            let path = name.segments();
            if path.is_empty() || path.iter().any(String::is_empty) {
                return Err(FuseError::EmptyKeyPath {
                    path: name.display(),
                });
            }

            let weight = match spec.weight() {
                Some(weight) if weight.is_finite() && weight > 0.0 => weight,
                Some(weight) => {
                    return Err(FuseError::InvalidKeyWeight {
                        key: name.display(),
                        weight,
                    })
                }
                None => 1.0,
            };

            total_weight += weight;
            keys.push(Key {
                id: path.join("."),
                path,
                weight,
            });
        }

        for key in &mut keys {
            key.weight /= total_weight;
        }

        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Key> {
        self.keys.iter().find(|key| key.id == id)
    }
}
