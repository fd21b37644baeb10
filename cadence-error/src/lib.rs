// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the Cadence timing-control combinators
//!
//! This crate defines the root [`CadenceError`] type shared by every combinator.
//! Debounce and the synchronous throttle never surface errors through their
//! wrappers; the async throttle, the retry scheduler and memoize report failures
//! of the wrapped function through this type.
//!
//! # Examples
//!
//! ```
//! use cadence_error::{CadenceError, Result};
//!
//! fn interval_from(value: i64) -> Result<u64> {
//!     u64::try_from(value).map_err(|_| CadenceError::configuration("interval", value))
//! }
//!
//! assert!(interval_from(-1).is_err());
//! ```

use std::error::Error;

/// Boxed, thread-safe error produced by a wrapped function.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Root error type for all Cadence operations
#[derive(Debug, thiserror::Error)]
pub enum CadenceError {
    /// A wait, interval, delay or attempt parameter was out of range
    ///
    /// Raised by the validated millisecond constructors when they receive a
    /// negative value.
    #[error("Invalid configuration: {parameter} must be non-negative (got {value})")]
    Configuration {
        /// Name of the offending parameter
        parameter: String,
        /// The rejected value
        value: i64,
    },

    /// The wrapped function failed
    #[error("Operation failed: {0}")]
    OperationFailure(#[source] BoxError),

    /// The retry scheduler ran out of attempts
    ///
    /// `source` is the failure observed on the final attempt.
    #[error("Retries exhausted after {attempts} attempts: {source}")]
    ExhaustedRetries {
        /// Total number of invocations, including the first one
        attempts: u32,
        /// The last observed failure
        #[source]
        source: BoxError,
    },

    /// Memoize could not derive a canonical key from the call arguments
    #[error("Failed to serialize cache key: {context}")]
    Serialization {
        /// Details from the serializer
        context: String,
    },
}

impl CadenceError {
    /// Create a configuration error for a negative parameter
    pub fn configuration(parameter: impl Into<String>, value: i64) -> Self {
        Self::Configuration {
            parameter: parameter.into(),
            value,
        }
    }

    /// Wrap a failure of the wrapped function
    pub fn operation(error: impl Error + Send + Sync + 'static) -> Self {
        Self::OperationFailure(Box::new(error))
    }

    /// Create a retry exhaustion error carrying the last failure
    pub fn exhausted(attempts: u32, source: BoxError) -> Self {
        Self::ExhaustedRetries { attempts, source }
    }

    /// Create a key serialization error with the given context
    pub fn serialization(context: impl Into<String>) -> Self {
        Self::Serialization {
            context: context.into(),
        }
    }

    /// The failure raised by the wrapped function, if this error carries one
    #[must_use]
    pub fn failure(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::OperationFailure(source) | Self::ExhaustedRetries { source, .. } => {
                Some(source.as_ref())
            }
            Self::Configuration { .. } | Self::Serialization { .. } => None,
        }
    }

    /// Downcast the wrapped function's failure to its concrete type
    #[must_use]
    pub fn downcast_failure<E: Error + 'static>(&self) -> Option<&E> {
        self.failure().and_then(|source| source.downcast_ref::<E>())
    }

    /// Check if the error was caused by invalid configuration
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Check if the error originates from the wrapped function
    #[must_use]
    pub const fn is_operation_failure(&self) -> bool {
        matches!(
            self,
            Self::OperationFailure(_) | Self::ExhaustedRetries { .. }
        )
    }
}

/// Specialized Result type for Cadence operations
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Extension trait for converting wrapped-function errors into `CadenceError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoCadenceError {
    /// Convert this error into [`CadenceError::OperationFailure`]
    fn into_cadence(self) -> CadenceError;

    /// Box this error without classifying it
    fn into_boxed(self) -> BoxError;
}

impl<E: Error + Send + Sync + 'static> IntoCadenceError for E {
    fn into_cadence(self) -> CadenceError {
        CadenceError::operation(self)
    }

    fn into_boxed(self) -> BoxError {
        Box::new(self)
    }
}
