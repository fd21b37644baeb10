// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::future::Future;

use cadence_error::{BoxError, CadenceError, IntoCadenceError, Result};
use cadence_runtime::runtime::Runtime;
use cadence_runtime::{debug, trace, DefaultRuntime};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;

use crate::key::canonical_key;
use crate::table::CacheTable;

type MemoizedAsyncFn<A, T> =
    Box<dyn Fn(A) -> BoxFuture<'static, core::result::Result<T, BoxError>> + Send + Sync>;

/// An async function whose successful results are cached by argument value.
pub struct MemoizedAsync<A, T: Send, R: Runtime = DefaultRuntime> {
    func: MemoizedAsyncFn<A, T>,
    table: CacheTable<T, R>,
}

/// Cache the successful results of an async `func`.
pub fn memoize_async<A, T, E, F, Fut>(func: F) -> MemoizedAsync<A, T>
where
    A: Serialize,
    T: Clone + Send,
    E: std::error::Error + Send + Sync + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = core::result::Result<T, E>> + Send + 'static,
{
    MemoizedAsync::new(func)
}

impl<A, T, R> MemoizedAsync<A, T, R>
where
    A: Serialize,
    T: Clone + Send,
    R: Runtime,
{
    pub fn new<E, F, Fut>(func: F) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = core::result::Result<T, E>> + Send + 'static,
    {
        Self {
            func: Box::new(move |args| func(args).map(|r| r.map_err(E::into_boxed)).boxed()),
            table: CacheTable::new(),
        }
    }

    /// Return the cached result for `args`, awaiting the function on a miss.
    ///
    /// The key is derived before `args` is handed to the function. The cache
    /// lock is released while the function's future is pending.
    ///
    /// # Errors
    /// [`CadenceError::Serialization`] when `args` has no canonical key, or
    /// [`CadenceError::OperationFailure`] when the function fails.
    pub async fn call(&self, args: A) -> Result<T> {
        let key = canonical_key(&args)?;

        if let Some(hit) = self.table.get(&key) {
            trace!("memoize_async: cache hit for {key}");
            return Ok(hit);
        }

        debug!("memoize_async: cache miss for {key}");
        let value = (self.func)(args)
            .await
            .map_err(CadenceError::OperationFailure)?;
        Ok(self.table.insert_once(key, value))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
