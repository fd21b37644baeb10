// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scripted fallible async operation.

use core::future::Future;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::error::TestError;

/// An async operation that fails a fixed number of times, then succeeds.
///
/// Every call to [`run`](Self::run) counts as one attempt. A successful attempt
/// resolves to its 1-based attempt number; a failing one to
/// [`TestError::Transient`] carrying the same number.
#[derive(Clone, Debug)]
pub struct FlakyOperation {
    failures: u32,
    latency: Duration,
    attempts: Arc<AtomicU32>,
    started: Arc<Mutex<Vec<Instant>>>,
}

impl FlakyOperation {
    /// Fails the first `failures` attempts.
    #[must_use]
    pub fn failing(failures: u32) -> Self {
        Self {
            failures,
            latency: Duration::ZERO,
            attempts: Arc::new(AtomicU32::new(0)),
            started: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn always_failing() -> Self {
        Self::failing(u32::MAX)
    }

    #[must_use]
    pub fn succeeding() -> Self {
        Self::failing(0)
    }

    /// Each attempt sleeps for `latency` before resolving.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Virtual start time of every attempt so far.
    pub fn attempt_times(&self) -> Vec<Instant> {
        self.started.lock().clone()
    }

    pub fn run(&self) -> impl Future<Output = Result<u32, TestError>> + Send + 'static {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        self.started.lock().push(Instant::now());
        let failures = self.failures;
        let latency = self.latency;

        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            if attempt <= failures {
                Err(TestError::Transient(attempt))
            } else {
                Ok(attempt)
            }
        }
    }
}
