// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{mutex::MutexLike, timer::Timer};
use core::fmt::Debug;
use core::future::Future;

pub trait Runtime: Send + Sync + 'static {
    type Mutex<T: ?Sized + Send>: MutexLike<T> + Send + Sync;
    type Timer: Timer<Instant = Self::Instant>;
    type Instant: Copy + Ord + Send + Sync + Debug;

    /// Spawns a detached task on the host executor.
    fn spawn<F>(future: F)
    where
        F: Future<Output = ()> + Send + 'static;
}
