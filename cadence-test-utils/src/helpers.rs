// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio::time::{advance, Instant};

/// Yield enough times for tasks woken by the last clock change to run.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Advance the paused clock by `millis` and let woken tasks run.
pub async fn advance_ms(millis: u64) {
    advance(Duration::from_millis(millis)).await;
    settle().await;
}

/// Milliseconds elapsed between `start` and `at`.
pub fn elapsed_ms(start: Instant, at: Instant) -> u128 {
    (at - start).as_millis()
}
