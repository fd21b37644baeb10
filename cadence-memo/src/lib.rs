// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Result caching keyed by the value of a call's arguments.
//!
//! Arguments are serialized to a canonical JSON key, so any
//! [`serde::Serialize`] type works, including tuples for functions of several
//! arguments. Equal keys mean equal arguments; the wrapped function is not
//! invoked again for them.
//!
//! - Only successful results are cached
//! - Entries are written once and never replaced
//! - The cache is unbounded; there is no eviction or invalidation
//!
//! # Example
//!
//! ```rust
//! use cadence_memo::memoize;
//!
//! # fn main() -> cadence_error::Result<()> {
//! let add = memoize(|(a, b): &(i32, i32)| a + b);
//!
//! assert_eq!(add.call(&(1, 2))?, 3);
//! assert_eq!(add.call(&(1, 2))?, 3);
//! assert_eq!(add.len(), 1);
//! # Ok(())
//! # }
//! ```

mod finite;
mod key;
mod memoize;
mod memoize_async;
mod table;

pub use key::canonical_key;
pub use memoize::{memoize, try_memoize, MemoizeExt, Memoized};
pub use memoize_async::{memoize_async, MemoizedAsync};
