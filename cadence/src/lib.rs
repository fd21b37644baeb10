// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Cadence
//!
//! Combinators that change *when* and *how often* a function runs, while
//! keeping it callable like before.
//!
//! ## Overview
//!
//! | wrapper            | behaviour                                                      |
//! |--------------------|----------------------------------------------------------------|
//! | [`debounce`]       | runs once, `wait` after the last call of a burst               |
//! | [`throttle`]       | runs at most once per `interval`, dropping excess calls        |
//! | [`throttle_async`] | like `throttle`, the interval counted from completion          |
//! | [`retry`]          | re-runs a failing async operation with a fixed delay           |
//! | [`memoize`]        | caches results keyed by the serialized arguments               |
//!
//! The wrappers are independent of each other and can be stacked freely.
//! Timers and spawning go through [`runtime::Runtime`]; tokio is the default
//! backend, smol is available behind the `runtime-smol` feature.
//!
//! ## Quick Start
//!
//! ```rust
//! use cadence::prelude::*;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> cadence::Result<()> {
//! let log = throttle(|line: String| line.len(), Duration::from_secs(1));
//! assert_eq!(log.call("printed".to_string()), Some(7));
//! assert_eq!(log.call("dropped".to_string()), None);
//!
//! let factorial = memoize(|n: &u64| (1..=*n).product::<u64>());
//! assert_eq!(factorial.call(&5)?, 120);
//!
//! let config = RetryConfig::default().with_delay(Duration::from_millis(1));
//! let value = retry_with(config, || async { Ok::<_, std::io::Error>(7) }).await?;
//! assert_eq!(value, 7);
//! # Ok(())
//! # }
//! ```

pub use cadence_error::{BoxError, CadenceError, IntoCadenceError, Result};

pub use cadence_limit::{
    debounce, throttle, throttle_async, try_debounce, try_throttle, try_throttle_async,
    DebounceExt, Debounced, ThrottleAsyncExt, ThrottleExt, Throttled, ThrottledAsync,
};
pub use cadence_memo::{
    canonical_key, memoize, memoize_async, try_memoize, MemoizeExt, Memoized, MemoizedAsync,
};
pub use cadence_retry::{retry, retry_with, RetryConfig, RetryScheduler};

pub use cadence_runtime::{
    impls, mutex, runtime, timer, CancellationToken, DefaultRuntime, Millis, ScheduledTask,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        debounce, memoize, memoize_async, retry, retry_with, throttle, throttle_async,
        try_memoize, CadenceError, DebounceExt, MemoizeExt, Result, RetryConfig,
        ThrottleAsyncExt, ThrottleExt,
    };
}
