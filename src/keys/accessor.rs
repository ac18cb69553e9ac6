// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structural field access over arbitrary item types.
//!
//! `Searchable` is the one capability an item needs. Plain strings answer
//! `as_text` and skip key resolution entirely. Records answer `resolve`,
//! which walks a key path and returns what's there.
//!
//! `serde_json::Value` gets a full implementation. Typed records usually just
//! forward to `resolve_serialized`, which goes through serde:
//!
//! ```
//! use bitfuse::{resolve_serialized, FieldValue, Searchable};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Book { title: String }
//!
//! impl Searchable for Book {
//!     fn resolve(&self, path: &[String]) -> FieldValue {
//!         resolve_serialized(self, path)
//!     }
//! }
//! ```
//!
//! # Resolution rules
//!
//! - A missing or null field anywhere on the path → `Missing`. Not an error.
//! - A string, number or bool at the end of the path → `Text`.
//! - An array anywhere on the path fans out: each element is resolved with
//!   the rest of the path, nested arrays flatten, and the result is a `List`.
//! - A path that ends on an object → `Missing`.

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

/// What a key path resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Missing,
    Text(String),
    /// The path crossed an array. May be empty.
    List(Vec<String>),
}

/// Something the index can search.
pub trait Searchable {
    /// Plain string items return their text; keys are then ignored.
    fn as_text(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Resolve a key path. The default finds nothing.
    fn resolve(&self, path: &[String]) -> FieldValue {
        let _ = path;
        FieldValue::Missing
    }
}

impl Searchable for str {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl Searchable for String {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl Searchable for Cow<'_, str> {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_ref()))
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        (**self).as_text()
    }

    fn resolve(&self, path: &[String]) -> FieldValue {
        (**self).resolve(path)
    }
}

impl<T: Searchable + ?Sized> Searchable for Box<T> {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        (**self).as_text()
    }

    fn resolve(&self, path: &[String]) -> FieldValue {
        (**self).resolve(path)
    }
}

impl<T: Searchable + ?Sized> Searchable for Arc<T> {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        (**self).as_text()
    }

    fn resolve(&self, path: &[String]) -> FieldValue {
        (**self).resolve(path)
    }
}

impl Searchable for Value {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        self.as_str().map(Cow::Borrowed)
    }

    fn resolve(&self, path: &[String]) -> FieldValue {
        resolve_value(self, path)
    }
}

/// Resolve a path against any serializable value.
///
/// Serializes the whole item to a JSON value first. The index resolves keys
/// once per item at insertion, so this cost is not paid per search.
pub fn resolve_serialized<T: Serialize + ?Sized>(item: &T, path: &[String]) -> FieldValue {
    match serde_json::to_value(item) {
        Ok(value) => resolve_value(&value, path),
        Err(_) => FieldValue::Missing,
    }
}

/// Resolve a path against a JSON value.
pub fn resolve_value(value: &Value, path: &[String]) -> FieldValue {
    let mut found = Vec::new();
    let mut fanned_out = false;
    walk(value, path, &mut found, &mut fanned_out);

    if fanned_out {
        FieldValue::List(found)
    } else {
        found
            .into_iter()
            .next()
            .map_or(FieldValue::Missing, FieldValue::Text)
    }
}

fn walk(value: &Value, path: &[String], found: &mut Vec<String>, fanned_out: &mut bool) {
    match (value, path.split_first()) {
        (Value::Array(elements), _) => {
            *fanned_out = true;
            for element in elements {
                walk(element, path, found, fanned_out);
            }
        }
        (_, None) => {
            if let Some(text) = scalar_text(value) {
                found.push(text);
            }
        }
        (Value::Object(fields), Some((segment, rest))) => {
            if let Some(next) = fields.get(segment.as_str()) {
                walk(next, rest, found, fanned_out);
            }
        }
        _ => {}
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
