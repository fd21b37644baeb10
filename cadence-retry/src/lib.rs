// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bounded retry scheduler for fallible async operations.
//!
//! The operation is invoked once; every failure while retry budget remains
//! waits a fixed delay and invokes it again. Attempts are strictly sequential.
//!
//! `max_attempts` counts the retries *after* the first attempt, so an
//! operation that always fails is invoked `max_attempts + 1` times before the
//! scheduler gives up with [`CadenceError::ExhaustedRetries`] carrying the
//! last failure.
//!
//! # Example
//!
//! ```rust
//! use cadence_retry::{retry_with, RetryConfig};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> cadence_error::Result<()> {
//! let config = RetryConfig::default().with_delay(Duration::from_millis(10));
//! let value = retry_with(config, || async { Ok::<_, std::io::Error>(42) }).await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

mod config;

pub use config::RetryConfig;

use core::future::Future;

use cadence_error::{CadenceError, IntoCadenceError, Result};
use cadence_runtime::runtime::Runtime;
use cadence_runtime::timer::Timer;
use cadence_runtime::{debug, error, warn, DefaultRuntime};

/// Retries an operation according to a [`RetryConfig`].
///
/// Holds no per-call state; one scheduler can drive any number of operations,
/// each through its own sequential attempt loop.
pub struct RetryScheduler<R: Runtime = DefaultRuntime> {
    config: RetryConfig,
    timer: R::Timer,
}

impl<R: Runtime> Default for RetryScheduler<R> {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl<R: Runtime> core::fmt::Debug for RetryScheduler<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RetryScheduler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<R: Runtime> RetryScheduler<R> {
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            timer: R::Timer::default(),
        }
    }

    pub fn config(&self) -> RetryConfig {
        self.config
    }

    /// Run `operation` until it succeeds or the retry budget is spent.
    ///
    /// # Errors
    /// Returns [`CadenceError::ExhaustedRetries`] with the last failure once
    /// `max_attempts + 1` invocations have all failed.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = core::result::Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let RetryConfig {
            max_attempts,
            delay,
        } = self.config;
        let mut remaining = max_attempts;
        let mut attempt: u32 = 0;

        loop {
            attempt = attempt.saturating_add(1);

            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("retry: succeeded on attempt {attempt}");
                    }
                    return Ok(value);
                }
                Err(err) if remaining > 0 => {
                    remaining -= 1;
                    warn!("retry: attempt {attempt} failed: {err}; retrying in {delay:?}");
                    self.timer.sleep_future(delay).await;
                }
                Err(err) => {
                    error!("retry: giving up after {attempt} attempts: {err}");
                    return Err(CadenceError::exhausted(attempt, err.into_boxed()));
                }
            }
        }
    }
}

/// Retry `operation` with the default budget (3 retries, 1 second apart).
///
/// # Errors
/// See [`RetryScheduler::run`].
pub async fn retry<T, E, F, Fut>(operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = core::result::Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    retry_with(RetryConfig::default(), operation).await
}

/// Retry `operation` with an explicit budget and delay.
///
/// # Errors
/// See [`RetryScheduler::run`].
pub async fn retry_with<T, E, F, Fut>(config: RetryConfig, operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = core::result::Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    RetryScheduler::<DefaultRuntime>::new(config)
        .run(operation)
        .await
}
