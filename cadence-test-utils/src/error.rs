// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestError {
    #[error("transient failure on attempt {0}")]
    Transient(u32),
    #[error("permanent failure: {0}")]
    Permanent(String),
}
