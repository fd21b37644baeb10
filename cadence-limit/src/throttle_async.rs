// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Leading throttle for async, fallible functions.
//!
//! The gate closes when a call starts and stays closed while it is in flight.
//! What happens next depends on the outcome:
//!
//! - **Success** - the gate reopens `interval` after the call *completed*
//! - **Failure** - the gate reopens immediately and the error is returned
//! - **Abandoned** (the caller dropped the future) - treated like a failure
//!
//! Calls made while the gate is closed resolve to `Ok(None)`.

use core::future::Future;
use core::time::Duration;

use cadence_error::{BoxError, CadenceError, IntoCadenceError, Result};
use cadence_runtime::mutex::MutexLike;
use cadence_runtime::runtime::Runtime;
use cadence_runtime::timer::Timer;
use cadence_runtime::{debug, trace, DefaultRuntime, Millis};
use futures::future::BoxFuture;
use futures::FutureExt;

use crate::gate::{Gate, RunningGuard};

type ThrottledAsyncFn<A, T> =
    Box<dyn Fn(A) -> BoxFuture<'static, core::result::Result<T, BoxError>> + Send + Sync>;

/// An async function wrapped with completion-based throttle.
pub struct ThrottledAsync<A, T, R: Runtime = DefaultRuntime> {
    func: ThrottledAsyncFn<A, T>,
    interval: Duration,
    timer: R::Timer,
    gate: R::Mutex<Gate<R::Instant>>,
}

/// Wrap the async `func` so a new call only starts `interval` after the
/// previous successful one finished.
pub fn throttle_async<A, T, E, F, Fut>(func: F, interval: Duration) -> ThrottledAsync<A, T>
where
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = core::result::Result<T, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    ThrottledAsync::new(func, interval)
}

/// Like [`throttle_async`], validating a signed millisecond `interval_ms`.
///
/// # Errors
/// Returns [`CadenceError::Configuration`] when `interval_ms` is negative.
pub fn try_throttle_async<A, T, E, F, Fut>(
    func: F,
    interval_ms: i64,
) -> Result<ThrottledAsync<A, T>>
where
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = core::result::Result<T, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let interval = Millis::new("interval_ms", interval_ms)?;
    Ok(ThrottledAsync::new(func, interval.into()))
}

impl<A, T, R: Runtime> ThrottledAsync<A, T, R> {
    pub fn new<E, F, Fut>(func: F, interval: Duration) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = core::result::Result<T, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            func: Box::new(move |args| func(args).map(|r| r.map_err(E::into_boxed)).boxed()),
            interval,
            timer: R::Timer::default(),
            gate: MutexLike::new(Gate::Open),
        }
    }

    /// Run the wrapped function if the gate is open.
    ///
    /// # Errors
    /// Returns [`CadenceError::OperationFailure`] when the wrapped function fails.
    /// The gate is already open again when the error is returned.
    pub async fn call(&self, args: A) -> Result<Option<T>> {
        let now = self.timer.now();
        if !self.gate.lock().try_pass(now, Gate::Running) {
            trace!("throttle_async: gate closed, dropping call");
            return Ok(None);
        }

        let guard = RunningGuard::new(&self.gate);
        match (self.func)(args).await {
            Ok(value) => {
                let until = self.timer.deadline(self.timer.now(), self.interval);
                guard.settle(Gate::cooling(until));
                Ok(Some(value))
            }
            Err(err) => {
                debug!("throttle_async: call failed, reopening gate");
                guard.settle(Gate::Open);
                Err(CadenceError::OperationFailure(err))
            }
        }
    }

    /// Whether the next call would start.
    pub fn is_open(&self) -> bool {
        self.gate.lock().is_open(self.timer.now())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Extension trait providing `.throttled_async(interval)` on async functions.
pub trait ThrottleAsyncExt<A, T, E, Fut>: Fn(A) -> Fut + Send + Sync + Sized + 'static
where
    Fut: Future<Output = core::result::Result<T, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    fn throttled_async(self, interval: Duration) -> ThrottledAsync<A, T> {
        ThrottledAsync::new(self, interval)
    }
}

impl<A, T, E, Fut, F> ThrottleAsyncExt<A, T, E, Fut> for F
where
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = core::result::Result<T, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
}
