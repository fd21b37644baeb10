// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime abstraction shared by the Cadence combinators.
//!
//! The combinators never talk to an executor directly. Everything they need from
//! the host is expressed through three small traits:
//!
//! - [`Timer`](timer::Timer) - sleep futures and a monotonic clock
//! - [`MutexLike`](mutex::MutexLike) - the lock guarding per-wrapper state
//! - [`Runtime`](runtime::Runtime) - ties the two together and spawns detached tasks
//!
//! On top of these, [`ScheduledTask`] offers the schedule-once / cancel-by-handle
//! primitive used by debounce, and [`Millis`] validates signed millisecond input.
//!
//! # Runtime Support
//!
//! - `runtime-tokio` (default) - [`TokioRuntime`](impls::tokio::TokioRuntime)
//! - `runtime-smol` - [`SmolRuntime`](impls::smol::SmolRuntime)

mod cancellation_token;
pub mod impls;
mod logging;
mod millis;
pub mod mutex;
pub mod runtime;
mod scheduled_task;
pub mod timer;

pub use cancellation_token::{CancellationToken, Cancelled};
pub use millis::Millis;
pub use scheduled_task::ScheduledTask;

#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use tracing;

#[cfg(feature = "runtime-tokio")]
pub type DefaultRuntime = impls::tokio::TokioRuntime;

#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
pub type DefaultRuntime = impls::smol::SmolRuntime;

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
compile_error!("cadence-runtime requires either the `runtime-tokio` or the `runtime-smol` feature");
