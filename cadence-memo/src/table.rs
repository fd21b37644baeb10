// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::HashMap;

use cadence_runtime::mutex::MutexLike;
use cadence_runtime::runtime::Runtime;

/// Unbounded, write-once map from canonical key to result.
pub(crate) struct CacheTable<T: Send, R: Runtime> {
    entries: R::Mutex<HashMap<String, T>>,
}

impl<T: Clone + Send, R: Runtime> CacheTable<T, R> {
    pub(crate) fn new() -> Self {
        Self {
            entries: MutexLike::new(HashMap::new()),
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<T> {
        self.entries.lock().get(key).cloned()
    }

    /// Stores `value` unless `key` is already present, and returns whichever
    /// value the table holds afterwards.
    pub(crate) fn insert_once(&self, key: String, value: T) -> T {
        self.entries.lock().entry(key).or_insert(value).clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
