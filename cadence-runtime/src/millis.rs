// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_error::{CadenceError, Result};
use core::time::Duration;

/// A non-negative millisecond value validated from signed input.
///
/// Wait, interval and delay settings often arrive as plain signed integers
/// (CLI flags, config files). Converting through `Millis` rejects negative
/// values with [`CadenceError::Configuration`] instead of wrapping them into
/// huge durations.
///
/// ```
/// use cadence_runtime::Millis;
/// use std::time::Duration;
///
/// let wait = Millis::new("wait_ms", 250).unwrap();
/// assert_eq!(Duration::from(wait), Duration::from_millis(250));
///
/// assert!(Millis::new("wait_ms", -1).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Millis(u64);

impl Millis {
    /// Validate `value`, naming `parameter` in the error if it is negative.
    ///
    /// # Errors
    /// Returns [`CadenceError::Configuration`] when `value < 0`.
    pub fn new(parameter: &str, value: i64) -> Result<Self> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| CadenceError::configuration(parameter, value))
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl From<Millis> for Duration {
    fn from(value: Millis) -> Self {
        value.as_duration()
    }
}
