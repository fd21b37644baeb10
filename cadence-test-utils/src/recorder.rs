// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::Instant;

/// Records the arguments and virtual time of every invocation.
///
/// Clones share the same log, so a clone can be moved into the function under
/// test while the original stays with the test body.
#[derive(Debug)]
pub struct CallRecorder<A> {
    calls: Arc<Mutex<Vec<(A, Instant)>>>,
}

impl<A> Clone for CallRecorder<A> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<A> Default for CallRecorder<A> {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<A: Send + 'static> CallRecorder<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, args: A) {
        self.calls.lock().push((args, Instant::now()));
    }

    /// A function that records its argument, ready to be wrapped.
    pub fn callback(&self) -> impl Fn(A) + Send + Sync + 'static {
        let recorder = self.clone();
        move |args| recorder.record(args)
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn times(&self) -> Vec<Instant> {
        self.calls.lock().iter().map(|(_, at)| *at).collect()
    }
}

impl<A: Clone + Send + 'static> CallRecorder<A> {
    pub fn args(&self) -> Vec<A> {
        self.calls.lock().iter().map(|(args, _)| args.clone()).collect()
    }

    pub fn last(&self) -> Option<A> {
        self.calls.lock().last().map(|(args, _)| args.clone())
    }
}
