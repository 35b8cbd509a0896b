use std::time::Duration;

/// Identifies one arming of a debounce timer. Tokens only grow, so a fire
/// carrying an older token than the one last armed is recognisably stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    pub const FIRST: Self = Self(1);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// A cancellable one-shot timer.
///
/// When the delay elapses the implementation must hand `token` back to
/// [`SearchCoordinator::on_timer_fired`](super::SearchCoordinator::on_timer_fired).
pub trait DebounceTimer {
    /// Schedules `token` to fire after `delay`. Anything armed before is dropped.
    fn arm(&mut self, token: TimerToken, delay: Duration);

    /// Drops the armed timer, if any.
    fn cancel(&mut self);
}

/// Timer that never fires on its own; the owner decides when time has passed.
/// Used to drive the coordinator headlessly.
#[derive(Debug, Default)]
pub struct ManualTimer {
    armed: Option<(TimerToken, Duration)>,
    arm_count: usize,
    cancel_count: usize,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(&self) -> Option<(TimerToken, Duration)> {
        self.armed
    }

    pub fn arm_count(&self) -> usize {
        self.arm_count
    }

    pub fn cancel_count(&self) -> usize {
        self.cancel_count
    }

    /// Lets the quiet period elapse: disarms and returns the pending token.
    pub fn elapse(&mut self) -> Option<TimerToken> {
        self.armed.take().map(|(token, _)| token)
    }
}

impl DebounceTimer for ManualTimer {
    fn arm(&mut self, token: TimerToken, delay: Duration) {
        self.arm_count += 1;
        self.armed = Some((token, delay));
    }

    fn cancel(&mut self) {
        if self.armed.take().is_some() {
            self.cancel_count += 1;
        }
    }
}
