// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;

use cadence_error::{CadenceError, Result};
use cadence_runtime::Millis;

/// Retry budget and the fixed pause between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryConfig {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Build a config from signed values.
    ///
    /// # Errors
    /// Returns [`CadenceError::Configuration`] when either value is negative
    /// or `max_attempts` does not fit in a `u32`.
    pub fn from_millis(max_attempts: i64, delay_ms: i64) -> Result<Self> {
        let max_attempts = u32::try_from(max_attempts)
            .map_err(|_| CadenceError::configuration("max_attempts", max_attempts))?;
        let delay = Millis::new("delay_ms", delay_ms)?;

        Ok(Self::new(max_attempts, delay.into()))
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// How many times an always-failing operation is invoked.
    pub const fn total_invocations(&self) -> u32 {
        self.max_attempts.saturating_add(1)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_DELAY)
    }
}
