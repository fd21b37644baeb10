// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the Cadence combinators.
//!
//! Designed for development and testing only.
//!
//! # Key Types
//!
//! - [`CallRecorder`] - records every invocation of a wrapped function together
//!   with the (virtual) time it happened
//! - [`FlakyOperation`] - a scripted async operation that fails a fixed number of
//!   times before succeeding
//! - [`TestError`] - error type returned by scripted operations
//! - [`Person`] - a serializable fixture for memoize keys
//!
//! # Example
//!
//! ```rust
//! use cadence_test_utils::CallRecorder;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let recorder = CallRecorder::new();
//! let callback = recorder.callback();
//!
//! callback(7);
//! assert_eq!(recorder.args(), vec![7]);
//! # }
//! ```

#![allow(clippy::doc_markdown)]
pub mod error;
pub mod flaky;
pub mod helpers;
pub mod person;
pub mod recorder;
pub mod test_data;

pub use error::TestError;
pub use flaky::FlakyOperation;
pub use helpers::settle;
pub use person::Person;
pub use recorder::CallRecorder;
