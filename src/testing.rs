//! Test fixtures shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.
//! It provides the canonical corpora so every test searches the same data.

#![doc(hidden)]

use serde::{Deserialize, Serialize};

use crate::keys::{resolve_serialized, FieldValue, Searchable};

/// A flat record: two text fields and a tag list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub tags: Vec<String>,
}

impl Searchable for Book {
    fn resolve(&self, path: &[String]) -> FieldValue {
        resolve_serialized(self, path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

/// A record with a nested object, for dotted key paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedBook {
    pub title: String,
    pub author: Author,
}

impl Searchable for NestedBook {
    fn resolve(&self, path: &[String]) -> FieldValue {
        resolve_serialized(self, path)
    }
}

/// `["Apple", "Orange", "Banana"]`
pub fn fruits() -> Vec<String> {
    ["Apple", "Orange", "Banana"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn book(title: &str, author: &str, tags: &[&str]) -> Book {
    Book {
        title: title.to_string(),
        author: author.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// Four books where "John Smith" is an author once and a title once.
pub fn books() -> Vec<Book> {
    vec![
        book("Old Man's War fiction", "John X", &["war"]),
        book("Right Ho Jeeves", "P.D. Mans", &["fiction", "war"]),
        book("The life of Jane", "John Smith", &["john", "smith"]),
        book("John Smith", "Steve Pearson", &["steve", "pearson"]),
    ]
}

/// Two books with structured authors.
pub fn nested_books() -> Vec<NestedBook> {
    let nested = |title: &str, first: &str, last: &str| NestedBook {
        title: title.to_string(),
        author: Author {
            first_name: first.to_string(),
            last_name: last.to_string(),
        },
    };
    vec![
        nested("Old Man's War", "John", "Scalzi"),
        nested("The Lock Artist", "Steve", "Hamilton"),
    ]
}

/// The four books as JSON values.
pub fn book_values() -> Vec<serde_json::Value> {
    books()
        .iter()
        .filter_map(|b| serde_json::to_value(b).ok())
        .collect()
}
