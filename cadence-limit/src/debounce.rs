// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Trailing debounce for fire-and-forget functions.
//!
//! - Each call cancels the pending invocation (if any) and schedules a new one
//!   `wait` later with the new arguments
//! - If calls keep arriving faster than `wait`, the function does not run
//! - Once the caller pauses for `wait`, the function runs once with the
//!   arguments of the most recent call
//!
//! A zero `wait` still defers execution to a spawned task.

use core::time::Duration;
use std::sync::Arc;

use cadence_error::Result;
use cadence_runtime::mutex::MutexLike;
use cadence_runtime::runtime::Runtime;
use cadence_runtime::{debug, trace, DefaultRuntime, Millis, ScheduledTask};

type DebouncedFn<A> = Arc<dyn Fn(A) + Send + Sync>;

/// The single invocation a debounced wrapper may have outstanding.
#[derive(Debug, Default)]
struct PendingInvocation {
    generation: u64,
    task: Option<ScheduledTask>,
}

/// A function wrapped with trailing debounce.
///
/// Created by [`debounce`], [`try_debounce`] or [`DebounceExt::debounced`].
/// Dropping the wrapper cancels an invocation that has not fired yet.
pub struct Debounced<A, R: Runtime = DefaultRuntime> {
    func: DebouncedFn<A>,
    wait: Duration,
    pending: R::Mutex<PendingInvocation>,
}

/// Wrap `func` so it only runs after `wait` has elapsed without further calls.
pub fn debounce<A, F>(func: F, wait: Duration) -> Debounced<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced::new(func, wait)
}

/// Like [`debounce`], validating a signed millisecond `wait_ms`.
///
/// # Errors
/// Returns [`CadenceError::Configuration`](cadence_error::CadenceError::Configuration)
/// when `wait_ms` is negative.
pub fn try_debounce<A, F>(func: F, wait_ms: i64) -> Result<Debounced<A>>
where
    F: Fn(A) + Send + Sync + 'static,
{
    let wait = Millis::new("wait_ms", wait_ms)?;
    Ok(Debounced::new(func, wait.into()))
}

impl<A, R: Runtime> Debounced<A, R> {
    /// Wrap `func` on runtime `R`.
    pub fn new<F>(func: F, wait: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            wait,
            pending: MutexLike::new(PendingInvocation::default()),
        }
    }

    /// Schedule the wrapped function with `args`, superseding any pending call.
    ///
    /// Returns immediately. The function's outcome is not reported back; a panic
    /// inside it only affects the background task running it. Must be called
    /// from within the runtime's context.
    pub fn call(&self, args: A)
    where
        A: Send + 'static,
    {
        let mut pending = self.pending.lock();
        pending.generation = pending.generation.wrapping_add(1);
        let generation = pending.generation;

        if pending.task.take().is_some() {
            trace!("debounce: superseded pending invocation");
        }

        let func = Arc::clone(&self.func);
        let state = self.pending.clone();
        pending.task = Some(ScheduledTask::schedule_once::<R, _>(self.wait, move || {
            let current = {
                let mut pending = state.lock();
                let current = pending.generation == generation;
                if current {
                    pending.task = None;
                }
                current
            };

            if current {
                debug!("debounce: quiet period elapsed, invoking");
                func(args);
            }
        }));
    }

    /// Whether an invocation is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.lock().task.is_some()
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}

impl<A, R: Runtime> Drop for Debounced<A, R> {
    fn drop(&mut self) {
        // The scheduled callback keeps `pending` alive, so cancel explicitly.
        drop(self.pending.lock().task.take());
    }
}

/// Extension trait providing `.debounced(wait)` on plain functions.
pub trait DebounceExt<A>: Fn(A) + Send + Sync + Sized + 'static {
    /// Wrap `self` with trailing debounce on the default runtime.
    fn debounced(self, wait: Duration) -> Debounced<A> {
        Debounced::new(self, wait)
    }
}

impl<A, F> DebounceExt<A> for F where F: Fn(A) + Send + Sync + 'static {}
