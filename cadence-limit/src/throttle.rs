// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Leading throttle for synchronous functions.
//!
//! - When the gate is open, the call runs immediately and the gate closes for
//!   `interval`
//! - Calls arriving while the gate is closed are dropped, not queued
//! - After `interval` the next call runs immediately again
//! - An `interval` reaching past the clock's range closes the gate for good

use core::time::Duration;

use cadence_error::Result;
use cadence_runtime::mutex::MutexLike;
use cadence_runtime::runtime::Runtime;
use cadence_runtime::timer::Timer;
use cadence_runtime::{trace, DefaultRuntime, Millis};

use crate::gate::Gate;

type ThrottledFn<A, T> = Box<dyn Fn(A) -> T + Send + Sync>;

/// A function wrapped with leading throttle.
pub struct Throttled<A, T, R: Runtime = DefaultRuntime> {
    func: ThrottledFn<A, T>,
    interval: Duration,
    timer: R::Timer,
    gate: R::Mutex<Gate<R::Instant>>,
}

/// Wrap `func` so it runs at most once per `interval`.
pub fn throttle<A, T, F>(func: F, interval: Duration) -> Throttled<A, T>
where
    F: Fn(A) -> T + Send + Sync + 'static,
{
    Throttled::new(func, interval)
}

/// Like [`throttle`], validating a signed millisecond `interval_ms`.
///
/// # Errors
/// Returns [`CadenceError::Configuration`](cadence_error::CadenceError::Configuration)
/// when `interval_ms` is negative.
pub fn try_throttle<A, T, F>(func: F, interval_ms: i64) -> Result<Throttled<A, T>>
where
    F: Fn(A) -> T + Send + Sync + 'static,
{
    let interval = Millis::new("interval_ms", interval_ms)?;
    Ok(Throttled::new(func, interval.into()))
}

impl<A, T, R: Runtime> Throttled<A, T, R> {
    pub fn new<F>(func: F, interval: Duration) -> Self
    where
        F: Fn(A) -> T + Send + Sync + 'static,
    {
        Self {
            func: Box::new(func),
            interval,
            timer: R::Timer::default(),
            gate: MutexLike::new(Gate::Open),
        }
    }

    /// Run the wrapped function if the gate is open.
    ///
    /// Returns `Some(result)` when the function ran and `None` when the call
    /// was dropped because an earlier call in the same window already ran.
    pub fn call(&self, args: A) -> Option<T> {
        let now = self.timer.now();
        let next = Gate::cooling(self.timer.deadline(now, self.interval));

        if !self.gate.lock().try_pass(now, next) {
            trace!("throttle: gate closed, dropping call");
            return None;
        }

        Some((self.func)(args))
    }

    /// Whether the next call would run.
    pub fn is_open(&self) -> bool {
        self.gate.lock().is_open(self.timer.now())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Extension trait providing `.throttled(interval)` on plain functions.
pub trait ThrottleExt<A, T>: Fn(A) -> T + Send + Sync + Sized + 'static {
    fn throttled(self, interval: Duration) -> Throttled<A, T> {
        Throttled::new(self, interval)
    }
}

impl<A, T, F> ThrottleExt<A, T> for F where F: Fn(A) -> T + Send + Sync + 'static {}
