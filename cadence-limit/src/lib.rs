// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Rate-limiting wrappers for plain and async functions.
//!
//! Each wrapper owns a function and alters *when* and *how often* it runs:
//!
//! - **[`Debounced`]** - runs the function once a quiet period has elapsed, with the
//!   arguments of the latest call
//! - **[`Throttled`]** - runs at most once per interval, the first call in a window wins
//! - **[`ThrottledAsync`]** - like `Throttled`, but the window starts when the async
//!   call completes; a failed call reopens the gate immediately
//!
//! Every wrapper is generic over a [`Runtime`](cadence_runtime::runtime::Runtime)
//! and defaults to [`DefaultRuntime`](cadence_runtime::DefaultRuntime).
//!
//! # Example
//!
//! ```rust
//! use cadence_limit::{debounce, throttle};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let save = debounce(|draft: String| println!("saving {draft}"), Duration::from_millis(300));
//! save.call("h".to_string());
//! save.call("hello".to_string()); // only "hello" is saved
//!
//! let scroll = throttle(|offset: u32| offset * 2, Duration::from_millis(100));
//! assert_eq!(scroll.call(10), Some(20));
//! assert_eq!(scroll.call(11), None); // dropped, gate closed
//! # }
//! ```

mod debounce;
mod gate;
mod throttle;
mod throttle_async;

pub use debounce::{debounce, try_debounce, DebounceExt, Debounced};
pub use throttle::{throttle, try_throttle, ThrottleExt, Throttled};
pub use throttle_async::{throttle_async, try_throttle_async, ThrottleAsyncExt, ThrottledAsync};
