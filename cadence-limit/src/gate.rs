// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_runtime::mutex::MutexLike;

/// Throttle gate. Calls proceed only while the gate is open.
///
/// `Running`, `Cooling` and `Closed` are all closed; `Cooling` reopens by
/// itself once the clock reaches `until`. `Closed` is a cooldown whose end
/// lies beyond the clock's range and never reopens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Gate<I> {
    Open,
    Running,
    Cooling { until: I },
    Closed,
}

impl<I: Copy + Ord> Gate<I> {
    /// Cooldown ending at `until`, or `Closed` when there is no such instant.
    pub(crate) fn cooling(until: Option<I>) -> Self {
        until.map_or(Self::Closed, |until| Self::Cooling { until })
    }

    pub(crate) fn is_open(&self, now: I) -> bool {
        match self {
            Self::Open => true,
            Self::Running | Self::Closed => false,
            Self::Cooling { until } => now >= *until,
        }
    }

    /// Moves to `next` if the gate is open at `now`. Returns whether it was.
    pub(crate) fn try_pass(&mut self, now: I, next: Self) -> bool {
        if self.is_open(now) {
            *self = next;
            true
        } else {
            false
        }
    }
}

/// Reopens a `Running` gate if the in-flight call is abandoned before it settles.
pub(crate) struct RunningGuard<'a, I, M>
where
    I: Copy + Ord,
    M: MutexLike<Gate<I>>,
{
    gate: &'a M,
    settled: bool,
    _instant: core::marker::PhantomData<I>,
}

impl<'a, I, M> RunningGuard<'a, I, M>
where
    I: Copy + Ord,
    M: MutexLike<Gate<I>>,
{
    pub(crate) fn new(gate: &'a M) -> Self {
        Self {
            gate,
            settled: false,
            _instant: core::marker::PhantomData,
        }
    }

    pub(crate) fn settle(mut self, next: Gate<I>) {
        *self.gate.lock() = next;
        self.settled = true;
    }
}

impl<I, M> Drop for RunningGuard<'_, I, M>
where
    I: Copy + Ord,
    M: MutexLike<Gate<I>>,
{
    fn drop(&mut self) {
        if !self.settled {
            *self.gate.lock() = Gate::Open;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_runtime::runtime::Runtime;
    use cadence_runtime::DefaultRuntime;

    type TestMutex = <DefaultRuntime as Runtime>::Mutex<Gate<u64>>;

    #[test]
    fn test_cooling_reopens_at_deadline() {
        let gate = Gate::Cooling { until: 10_u64 };

        assert!(!gate.is_open(9));
        assert!(gate.is_open(10));
        assert!(gate.is_open(15));
    }

    #[test]
    fn test_unrepresentable_cooldown_never_reopens() {
        let gate = Gate::<u64>::cooling(None);

        assert_eq!(gate, Gate::Closed);
        assert!(!gate.is_open(u64::MAX));
        assert_eq!(Gate::cooling(Some(7_u64)), Gate::Cooling { until: 7 });
    }

    #[test]
    fn test_running_is_closed() {
        assert!(!Gate::<u64>::Running.is_open(u64::MAX));
    }

    #[test]
    fn test_try_pass_only_moves_an_open_gate() {
        let mut gate = Gate::Cooling { until: 10_u64 };

        assert!(!gate.try_pass(5, Gate::Running));
        assert_eq!(gate, Gate::Cooling { until: 10 });

        assert!(gate.try_pass(10, Gate::Running));
        assert_eq!(gate, Gate::Running);
    }

    #[test]
    fn test_abandoned_guard_reopens() {
        let gate = <TestMutex as MutexLike<_>>::new(Gate::Running);

        drop(RunningGuard::new(&gate));

        assert_eq!(*gate.lock(), Gate::Open);
    }

    #[test]
    fn test_settled_guard_keeps_next_state() {
        let gate = <TestMutex as MutexLike<_>>::new(Gate::Running);

        RunningGuard::new(&gate).settle(Gate::Cooling { until: 42 });

        assert_eq!(*gate.lock(), Gate::Cooling { until: 42 });
    }
}
