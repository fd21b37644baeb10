// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Schedule-once timer with cancel-by-handle.
//!
//! This is the only place the combinators defer work. A `ScheduledTask` spawns
//! a detached task on the configured runtime that sleeps for the requested
//! delay and then runs the callback, unless the handle was cancelled (or
//! dropped) first.

use core::pin::pin;
use core::time::Duration;
use futures::future::{select, Either};

use crate::runtime::Runtime;
use crate::timer::Timer;
use crate::CancellationToken;

/// Handle to a callback scheduled to run once after a delay.
///
/// Dropping the handle cancels the callback if it has not fired yet.
///
/// # Example
///
/// ```rust
/// use cadence_runtime::{DefaultRuntime, ScheduledTask};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = ScheduledTask::schedule_once::<DefaultRuntime, _>(Duration::from_millis(50), || {
///     println!("fired");
/// });
///
/// // Changed our mind: the callback will never run
/// task.cancel();
/// # }
/// ```
#[derive(Debug)]
pub struct ScheduledTask {
    cancel: CancellationToken,
}

impl ScheduledTask {
    /// Schedule `callback` to run once after `delay` on runtime `R`.
    ///
    /// A zero delay still defers the callback to the spawned task; it never
    /// runs synchronously inside this call. Must be called from within the
    /// runtime's context.
    pub fn schedule_once<R, F>(delay: Duration, callback: F) -> Self
    where
        R: Runtime,
        F: FnOnce() + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let sleep = R::Timer::default().sleep_future(delay);

        R::spawn(async move {
            let sleep = pin!(sleep);
            let cancelled = pin!(token.cancelled());
            let fired = matches!(select(sleep, cancelled).await, Either::Left(_));
            if fired && !token.is_cancelled() {
                callback();
            }
        });

        Self { cancel }
    }

    /// Cancel the callback. Has no effect if it already ran.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
