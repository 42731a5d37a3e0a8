use std::time::{Duration, Instant};

use super::machine::WizardEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Armed,
    Fired,
    Cancelled,
}

/// One-shot, cancellable timer that produces [`WizardEvent::SplashElapsed`].
///
/// The timer never looks at the wall clock itself; callers pass `now` to
/// [`SplashTimer::poll`], which keeps it usable from any event loop.
#[derive(Debug, Clone)]
pub struct SplashTimer {
    deadline: Instant,
    state: TimerState,
}

impl SplashTimer {
    pub fn start(now: Instant, duration: Duration) -> Self {
        Self {
            deadline: now + duration,
            state: TimerState::Armed,
        }
    }

    /// Returns the splash event the first time it is polled at or after the
    /// deadline. Later polls, and polls after [`cancel`](Self::cancel), return `None`.
    pub fn poll(&mut self, now: Instant) -> Option<WizardEvent> {
        if self.state != TimerState::Armed || now < self.deadline {
            return None;
        }
        self.state = TimerState::Fired;
        Some(WizardEvent::SplashElapsed)
    }

    pub fn cancel(&mut self) {
        if self.state == TimerState::Armed {
            self.state = TimerState::Cancelled;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.state == TimerState::Armed
    }

    pub fn has_fired(&self) -> bool {
        self.state == TimerState::Fired
    }

    /// Time left before the deadline; `None` once the timer is no longer armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        if self.is_armed() {
            Some(self.deadline.saturating_duration_since(now))
        } else {
            None
        }
    }
}
