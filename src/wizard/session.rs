use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::machine::{transition, Outcome, WizardEvent, WizardState};
use super::splash::SplashTimer;
use super::step::WizardStep;
use super::submission::{SubmissionEvent, SubmissionSink};
use crate::domain::{build_month_grid, DayDescriptor, YearMonth};
use crate::time::Clock;

/// Owns the live wizard state and routes events through the state machine.
///
/// A session starts on the splash screen with its timer armed. The timer is
/// cancelled by [`BookingSession::teardown`] and when the session is dropped.
pub struct BookingSession {
    state: WizardState,
    clock: Box<dyn Clock>,
    sink: Box<dyn SubmissionSink>,
    splash: Option<SplashTimer>,
    submitted: usize,
}

impl BookingSession {
    pub fn new(clock: Box<dyn Clock>, sink: Box<dyn SubmissionSink>) -> Self {
        Self {
            state: WizardState::new(),
            clock,
            sink,
            splash: None,
            submitted: 0,
        }
    }

    /// Arms the splash timer relative to `now`.
    pub fn start(&mut self, now: Instant, splash_duration: Duration) {
        debug!(?splash_duration, "splash timer armed");
        self.splash = Some(SplashTimer::start(now, splash_duration));
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn submitted_count(&self) -> usize {
        self.submitted
    }

    /// Time until the splash timer fires, if it is still armed.
    pub fn splash_remaining(&self, now: Instant) -> Option<Duration> {
        self.splash.as_ref().and_then(|timer| timer.remaining(now))
    }

    /// Polls the splash timer and applies its event when due. Returns `true`
    /// when the splash transition happened on this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(event) = self.splash.as_mut().and_then(|timer| timer.poll(now)) else {
            return false;
        };
        !self.dispatch(event).is_rejected()
    }

    /// Applies `event`; a finalized booking is forwarded to the sink.
    ///
    /// A selected day is re-derived from the session clock first, so a
    /// descriptor taken from a grid built on an earlier day is judged
    /// against today.
    pub fn dispatch(&mut self, event: WizardEvent) -> Outcome {
        let event = match event {
            WizardEvent::SelectDay(day) => WizardEvent::SelectDay(self.refresh(day)),
            other => other,
        };
        let name = event.name();
        let from = self.state.step;
        let current = std::mem::take(&mut self.state);
        let next = transition(current, event);
        self.state = next.state;

        match &next.outcome {
            Outcome::Applied => {
                debug!(event = name, %from, to = %self.state.step, "transition applied");
            }
            Outcome::Rejected(reason) => {
                debug!(event = name, step = %from, %reason, "transition rejected");
            }
            Outcome::Submitted(booking) => {
                let submission = SubmissionEvent::new(booking.clone(), self.clock.now());
                info!(id = %submission.id, booked = self.state.booked.len(), "booking finalized");
                self.sink.submit(&submission);
                self.submitted += 1;
            }
        }

        next.outcome
    }

    fn refresh(&self, day: DayDescriptor) -> DayDescriptor {
        // Padding cells are never selectable, whatever the date.
        if !day.is_current_month {
            return day;
        }
        build_month_grid(YearMonth::containing(day.date), self.clock.today())
            .find(day.date)
            .copied()
            .unwrap_or(day)
    }

    /// Cancels any pending splash advance. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(timer) = self.splash.as_mut() {
            if timer.is_armed() {
                debug!("splash timer cancelled");
            }
            timer.cancel();
        }
    }
}

impl Drop for BookingSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
