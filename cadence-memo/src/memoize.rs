// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::marker::PhantomData;

use cadence_error::{BoxError, CadenceError, IntoCadenceError, Result};
use cadence_runtime::runtime::Runtime;
use cadence_runtime::{debug, trace, DefaultRuntime};
use serde::Serialize;

use crate::key::canonical_key;
use crate::table::CacheTable;

type MemoizedFn<A, T> = Box<dyn Fn(&A) -> core::result::Result<T, BoxError> + Send + Sync>;

/// A function whose results are cached by argument value.
///
/// The cache grows without bound and is never invalidated.
pub struct Memoized<A: ?Sized, T: Send, R: Runtime = DefaultRuntime> {
    func: MemoizedFn<A, T>,
    table: CacheTable<T, R>,
    _args: PhantomData<fn(&A)>,
}

/// Cache the results of an infallible `func`.
pub fn memoize<A, T, F>(func: F) -> Memoized<A, T>
where
    A: Serialize + ?Sized,
    T: Clone + Send,
    F: Fn(&A) -> T + Send + Sync + 'static,
{
    Memoized::from_boxed(Box::new(move |args: &A| Ok(func(args))))
}

/// Cache the successful results of a fallible `func`. Failures are returned
/// and never cached, so the next call with the same arguments tries again.
pub fn try_memoize<A, T, E, F>(func: F) -> Memoized<A, T>
where
    A: Serialize + ?Sized,
    T: Clone + Send,
    E: std::error::Error + Send + Sync + 'static,
    F: Fn(&A) -> core::result::Result<T, E> + Send + Sync + 'static,
{
    Memoized::from_boxed(Box::new(move |args: &A| {
        func(args).map_err(E::into_boxed)
    }))
}

impl<A, T, R> Memoized<A, T, R>
where
    A: Serialize + ?Sized,
    T: Clone + Send,
    R: Runtime,
{
    fn from_boxed(func: MemoizedFn<A, T>) -> Self {
        Self {
            func,
            table: CacheTable::new(),
            _args: PhantomData,
        }
    }

    /// Return the cached result for `args`, computing it on a miss.
    ///
    /// The cache is not locked while the function runs. Two threads missing on
    /// the same key may both compute it; the first stored result is the one
    /// both receive.
    ///
    /// # Errors
    /// [`CadenceError::Serialization`] when `args` has no canonical key, or
    /// [`CadenceError::OperationFailure`] when the function fails.
    pub fn call(&self, args: &A) -> Result<T> {
        let key = canonical_key(args)?;

        if let Some(hit) = self.table.get(&key) {
            trace!("memoize: cache hit for {key}");
            return Ok(hit);
        }

        debug!("memoize: cache miss for {key}");
        let value = (self.func)(args).map_err(CadenceError::OperationFailure)?;
        Ok(self.table.insert_once(key, value))
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extension trait providing `.memoized()` on plain functions.
pub trait MemoizeExt<A: ?Sized, T>: Fn(&A) -> T + Send + Sync + Sized + 'static {
    fn memoized(self) -> Memoized<A, T>
    where
        A: Serialize,
        T: Clone + Send,
    {
        memoize(self)
    }
}

impl<A: ?Sized, T, F> MemoizeExt<A, T> for F where F: Fn(&A) -> T + Send + Sync + 'static {}
