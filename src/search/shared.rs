// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! An index that many threads can search while others update it.
//!
//! Searches take the read lock and copy their results out, so nothing
//! borrowed from the index escapes the lock. Mutations take the write lock.

use std::sync::Arc;

use parking_lot::RwLock;

use super::Fuse;
use crate::keys::Searchable;
use crate::types::{OwnedResult, SearchOptions};

/// Cheaply cloneable handle to a locked `Fuse`.
#[derive(Debug)]
pub struct SharedFuse<T> {
    inner: Arc<RwLock<Fuse<T>>>,
}

impl<T> Clone for SharedFuse<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> From<Fuse<T>> for SharedFuse<T> {
    fn from(fuse: Fuse<T>) -> Self {
        Self::new(fuse)
    }
}

impl<T> SharedFuse<T> {
    pub fn new(fuse: Fuse<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(fuse)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn remove<F>(&self, predicate: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.inner.write().remove(predicate)
    }

    pub fn remove_at(&self, ref_index: usize) -> Option<T> {
        self.inner.write().remove_at(ref_index)
    }

    /// Run a closure against the index under the read lock.
    pub fn with_read<R>(&self, f: impl FnOnce(&Fuse<T>) -> R) -> R {
        f(&self.inner.read())
    }
}

impl<T: Searchable> SharedFuse<T> {
    pub fn add(&self, item: T) -> usize {
        self.inner.write().add(item)
    }

    pub fn set_collection<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.inner.write().set_collection(items)
    }
}

impl<T: Clone + Sync> SharedFuse<T> {
    pub fn search(&self, query: &str) -> Vec<OwnedResult<T>> {
        self.search_with(query, SearchOptions::default())
    }

    pub fn search_with(&self, query: &str, options: SearchOptions) -> Vec<OwnedResult<T>> {
        let fuse = self.inner.read();
        let results = fuse
            .search_with(query, options)
            .iter()
            .map(|result| result.to_owned_result())
            .collect();
        results
    }
}
