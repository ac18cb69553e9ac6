//! Fuzzy full-text search over in-memory collections.
//!
//! Build a [`Fuse`] over strings or records, then search it with
//! approximate queries. Typos are fine: matching uses the bitap algorithm,
//! which scores each candidate by how many edits it needed and how far from
//! the expected position it landed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   keys      │────▶│   index      │────▶│   search     │
//! │ (Searchable,│     │ (Record,     │     │ (Fuse, Query,│
//! │  KeyStore)  │     │  field norm) │     │  SharedFuse) │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!                                                 │
//!        ┌──────────────────────┬─────────────────┤
//!        ▼                      ▼                 ▼
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   fuzzy     │     │  extended    │     │  scoring     │
//! │ (Pattern,   │◀────│ (operators,  │     │ (aggregate,  │
//! │  bitap)     │     │  OR / AND)   │     │  ranking)    │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! | Module     | Responsibility                                   |
//! |------------|--------------------------------------------------|
//! | `keys`     | Key specs, weights, structural field access      |
//! | `fuzzy`    | Pattern compilation, bitap matching, match score |
//! | `extended` | `=exact 'include ^prefix !not suffix$` syntax    |
//! | `scoring`  | Field norm, weighted aggregate, ranking order    |
//! | `index`    | Records precomputed per item                     |
//! | `search`   | The `Fuse` index and its search loop            |
//! | `binary`   | Snapshot save/load                               |
//!
//! # Usage
//!
//! ```
//! use bitfuse::{Config, Fuse, KeySpec};
//! use serde_json::json;
//!
//! let books = vec![
//!     json!({"title": "Old Man's War", "author": {"firstName": "John", "lastName": "Scalzi"}}),
//!     json!({"title": "The Lock Artist", "author": {"firstName": "Steve", "lastName": "Hamilton"}}),
//! ];
//! let config = Config::default().with_keys(["title", "author.firstName"]);
//! let fuse = Fuse::new(books, config).unwrap();
//!
//! let results = fuse.search("jon");
//! assert_eq!(results[0].item["author"]["lastName"], "Scalzi");
//! ```

// Module declarations
pub mod binary;
mod config;
mod error;
pub mod extended;
pub mod fuzzy;
pub mod index;
mod keys;
pub mod scoring;
mod search;
pub mod testing;
mod types;
pub mod util;

// Re-exports for public API
pub use config::{Config, DEFAULT_DISTANCE, DEFAULT_THRESHOLD};
pub use error::{FuseError, Result, SnapshotError};
pub use extended::ExtendedQuery;
pub use fuzzy::{MatchOptions, MatchResult, Pattern};
pub use keys::{
    resolve_serialized, resolve_value, FieldValue, Key, KeyName, KeySpec, KeyStore, Searchable,
};
pub use search::shared::SharedFuse;
pub use search::{Entry, Fuse, Query};
#[cfg(feature = "parallel")]
pub use search::PARALLEL_THRESHOLD;
pub use types::{MatchDetail, MatchRange, OwnedResult, SearchOptions, SearchResult};
