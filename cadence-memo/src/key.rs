// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_error::{CadenceError, Result};
use serde::Serialize;

use crate::finite::ensure_finite;

/// Canonical cache key for a call's arguments.
///
/// Arguments go through [`serde_json::Value`] first, whose object maps are
/// ordered, so two structurally equal values produce the same key regardless
/// of field or insertion order. Sequence order is kept: `(1, 2)` and `(2, 1)`
/// differ.
///
/// # Errors
/// Returns [`CadenceError::Serialization`] for values JSON cannot represent:
/// NaN or infinite floats anywhere in `args`, and maps keyed by compound
/// values such as tuples or sequences. Integer and bool map keys are written
/// as strings.
pub fn canonical_key<A: Serialize + ?Sized>(args: &A) -> Result<String> {
    ensure_finite(args).map_err(|err| CadenceError::serialization(err.to_string()))?;

    serde_json::to_value(args)
        .map(|value| value.to_string())
        .map_err(|err| CadenceError::serialization(err.to_string()))
}
