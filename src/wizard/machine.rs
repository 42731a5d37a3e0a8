//! Step state machine for the booking wizard.
//!
//! All transitions go through [`transition`], a pure function from the
//! current [`WizardState`] and a [`WizardEvent`] to the next state. Events
//! that are not legal in the current state, or whose gate is not satisfied,
//! leave the state untouched and report a [`Rejection`].

use std::fmt;

use chrono::NaiveDate;

use super::step::WizardStep;
use crate::domain::{BookedDateSet, BookingRecord, BookingUpdate, DayDescriptor};

/// Everything the wizard knows about the running session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,
    pub confirmation_open: bool,
    pub booking: BookingRecord,
    pub booked: BookedDateSet,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `event` would currently be accepted.
    pub fn accepts(&self, event: &WizardEvent) -> bool {
        check(self, event).is_ok()
    }
}

/// User intents and timer signals understood by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    SplashElapsed,
    SelectDay(DayDescriptor),
    Update(BookingUpdate),
    Back,
    Continue,
    RequestConfirmation,
    Finalize,
    CancelConfirmation,
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::SplashElapsed => "splash_elapsed",
            WizardEvent::SelectDay(_) => "select_day",
            WizardEvent::Update(_) => "update",
            WizardEvent::Back => "back",
            WizardEvent::Continue => "continue",
            WizardEvent::RequestConfirmation => "request_confirmation",
            WizardEvent::Finalize => "finalize",
            WizardEvent::CancelConfirmation => "cancel_confirmation",
        }
    }
}

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The event has no meaning on the current screen.
    WrongStep {
        step: WizardStep,
        event: &'static str,
    },
    /// Only confirm or cancel are accepted while the dialog is open.
    DialogOpen,
    /// Finalize or cancel arrived without an open dialog.
    DialogClosed,
    DayNotSelectable(NaiveDate),
    /// The date is only set by picking a day on the calendar.
    DateNotEditable,
    DetailsIncomplete,
    PhoneTooShort,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::WrongStep { step, event } => {
                write!(f, "`{event}` is not available on the {step} screen")
            }
            Rejection::DialogOpen => write!(f, "confirmation dialog is open"),
            Rejection::DialogClosed => write!(f, "confirmation dialog is not open"),
            Rejection::DayNotSelectable(date) => write!(f, "{date} cannot be selected"),
            Rejection::DateNotEditable => {
                write!(f, "the date can only be picked on the calendar")
            }
            Rejection::DetailsIncomplete => write!(f, "address or area size missing"),
            Rejection::PhoneTooShort => write!(f, "phone number too short"),
        }
    }
}

/// What happened when an event was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Booking finalized; carries the record as it was before the reset.
    Submitted(BookingRecord),
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }
}

/// Result of [`transition`]: the next state plus its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: WizardState,
    pub outcome: Outcome,
}

impl Transition {
    fn applied(state: WizardState) -> Self {
        Self {
            state,
            outcome: Outcome::Applied,
        }
    }

    fn rejected(state: WizardState, reason: Rejection) -> Self {
        Self {
            state,
            outcome: Outcome::Rejected(reason),
        }
    }
}

/// Applies `event` to `state`.
pub fn transition(mut state: WizardState, event: WizardEvent) -> Transition {
    if let Err(reason) = check(&state, &event) {
        return Transition::rejected(state, reason);
    }

    match event {
        WizardEvent::SplashElapsed => {
            state.step = WizardStep::Calendar;
        }
        WizardEvent::SelectDay(day) => {
            state.booking.merge(BookingUpdate::new().date(day.date));
            state.step = WizardStep::Details;
        }
        WizardEvent::Update(update) => {
            state.booking.merge(update);
        }
        WizardEvent::Back => {
            state.step = match state.step {
                WizardStep::Review => WizardStep::Details,
                _ => WizardStep::Calendar,
            };
        }
        WizardEvent::Continue => {
            state.step = WizardStep::Review;
        }
        WizardEvent::RequestConfirmation => {
            state.confirmation_open = true;
        }
        WizardEvent::Finalize => {
            let submitted = std::mem::take(&mut state.booking);
            if let Some(date) = submitted.date {
                state.booked.insert(date);
            }
            state.confirmation_open = false;
            state.step = WizardStep::Calendar;
            return Transition {
                state,
                outcome: Outcome::Submitted(submitted),
            };
        }
        WizardEvent::CancelConfirmation => {
            state.confirmation_open = false;
        }
    }

    Transition::applied(state)
}

fn check(state: &WizardState, event: &WizardEvent) -> Result<(), Rejection> {
    let wrong_step = || Rejection::WrongStep {
        step: state.step,
        event: event.name(),
    };

    if state.confirmation_open {
        return match event {
            WizardEvent::Finalize => match state.booking.date {
                Some(date) if state.booked.contains(date) => {
                    Err(Rejection::DayNotSelectable(date))
                }
                _ => Ok(()),
            },
            WizardEvent::CancelConfirmation => Ok(()),
            _ => Err(Rejection::DialogOpen),
        };
    }

    match (state.step, event) {
        (_, WizardEvent::Finalize | WizardEvent::CancelConfirmation) => {
            Err(Rejection::DialogClosed)
        }
        (WizardStep::Splash, WizardEvent::SplashElapsed) => Ok(()),
        (WizardStep::Calendar, WizardEvent::SelectDay(day)) => {
            if day.is_selectable(&state.booked) {
                Ok(())
            } else {
                Err(Rejection::DayNotSelectable(day.date))
            }
        }
        (WizardStep::Details | WizardStep::Review, WizardEvent::Update(update)) => {
            if update.date.is_some() {
                Err(Rejection::DateNotEditable)
            } else {
                Ok(())
            }
        }
        (WizardStep::Details | WizardStep::Review, WizardEvent::Back) => Ok(()),
        (WizardStep::Details, WizardEvent::Continue) => {
            if state.booking.details_complete() {
                Ok(())
            } else {
                Err(Rejection::DetailsIncomplete)
            }
        }
        (WizardStep::Review, WizardEvent::RequestConfirmation) => {
            if state.booking.contact_complete() {
                Ok(())
            } else {
                Err(Rejection::PhoneTooShort)
            }
        }
        _ => Err(wrong_step()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_month_grid, AreaType, YearMonth};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn day(d: u32) -> DayDescriptor {
        let grid = build_month_grid(YearMonth::new(2024, 6).unwrap(), date(10));
        *grid.find(date(d)).unwrap()
    }

    fn apply(state: WizardState, event: WizardEvent) -> WizardState {
        let next = transition(state, event);
        assert!(!next.outcome.is_rejected(), "{:?}", next.outcome);
        next.state
    }

    fn at_step(step: WizardStep) -> WizardState {
        WizardState {
            step,
            ..WizardState::new()
        }
    }

    fn ready_for_review() -> WizardState {
        let state = apply(at_step(WizardStep::Calendar), WizardEvent::SelectDay(day(15)));
        apply(
            state,
            WizardEvent::Update(
                BookingUpdate::new()
                    .address("Rua das Flores, 123")
                    .area_type(AreaType::SmallMedium),
            ),
        )
    }

    #[test]
    fn splash_elapses_into_calendar() {
        let state = apply(WizardState::new(), WizardEvent::SplashElapsed);
        assert_eq!(state.step, WizardStep::Calendar);
    }

    #[test]
    fn splash_elapsed_only_fires_from_splash() {
        let result = transition(at_step(WizardStep::Details), WizardEvent::SplashElapsed);
        assert!(result.outcome.is_rejected());
        assert_eq!(result.state.step, WizardStep::Details);
    }

    #[test]
    fn selecting_day_records_date_and_opens_details() {
        let state = apply(at_step(WizardStep::Calendar), WizardEvent::SelectDay(day(15)));
        assert_eq!(state.step, WizardStep::Details);
        assert_eq!(state.booking.date, Some(date(15)));
    }

    #[test]
    fn past_days_and_padding_are_refused() {
        let start = at_step(WizardStep::Calendar);
        let result = transition(start.clone(), WizardEvent::SelectDay(day(9)));
        assert_eq!(
            result.outcome,
            Outcome::Rejected(Rejection::DayNotSelectable(date(9)))
        );
        assert_eq!(result.state, start);

        let grid = build_month_grid(YearMonth::new(2024, 6).unwrap(), date(10));
        let padding = grid.days()[0];
        assert!(transition(start, WizardEvent::SelectDay(padding))
            .outcome
            .is_rejected());
    }

    #[test]
    fn booked_days_are_refused() {
        let mut start = at_step(WizardStep::Calendar);
        start.booked.insert(date(15));
        let result = transition(start, WizardEvent::SelectDay(day(15)));
        assert!(result.outcome.is_rejected());
        assert_eq!(result.state.booking.date, None);
    }

    #[test]
    fn continue_is_gated_on_details() {
        let state = apply(at_step(WizardStep::Calendar), WizardEvent::SelectDay(day(15)));
        let result = transition(state.clone(), WizardEvent::Continue);
        assert_eq!(result.outcome, Outcome::Rejected(Rejection::DetailsIncomplete));
        assert_eq!(result.state, state);

        let state = apply(
            state,
            WizardEvent::Update(
                BookingUpdate::new()
                    .address("Rua das Flores, 123")
                    .area_type(AreaType::Custom),
            ),
        );
        assert!(transition(state.clone(), WizardEvent::Continue)
            .outcome
            .is_rejected());

        let state = apply(
            state,
            WizardEvent::Update(BookingUpdate::new().custom_area_size("850m²")),
        );
        let state = apply(state, WizardEvent::Continue);
        assert_eq!(state.step, WizardStep::Review);
    }

    #[test]
    fn back_walks_review_details_calendar() {
        let state = apply(ready_for_review(), WizardEvent::Continue);
        let state = apply(state, WizardEvent::Back);
        assert_eq!(state.step, WizardStep::Details);
        let state = apply(state, WizardEvent::Back);
        assert_eq!(state.step, WizardStep::Calendar);
        assert_eq!(state.booking.date, Some(date(15)));
    }

    #[test]
    fn back_is_refused_on_calendar() {
        let result = transition(at_step(WizardStep::Calendar), WizardEvent::Back);
        assert!(result.outcome.is_rejected());
    }

    #[test]
    fn confirmation_requires_phone() {
        let state = apply(ready_for_review(), WizardEvent::Continue);
        let result = transition(state.clone(), WizardEvent::RequestConfirmation);
        assert_eq!(result.outcome, Outcome::Rejected(Rejection::PhoneTooShort));
        assert!(!result.state.confirmation_open);

        let state = apply(
            state,
            WizardEvent::Update(BookingUpdate::new().phone("11999998888")),
        );
        let state = apply(state, WizardEvent::RequestConfirmation);
        assert!(state.confirmation_open);
        assert_eq!(state.step, WizardStep::Review);
    }

    #[test]
    fn open_dialog_blocks_other_events() {
        let mut state = apply(ready_for_review(), WizardEvent::Continue);
        state.booking.phone = "11999998888".into();
        let state = apply(state, WizardEvent::RequestConfirmation);
        for event in [
            WizardEvent::Back,
            WizardEvent::Continue,
            WizardEvent::RequestConfirmation,
            WizardEvent::Update(BookingUpdate::new().phone("0")),
        ] {
            let result = transition(state.clone(), event);
            assert_eq!(result.outcome, Outcome::Rejected(Rejection::DialogOpen));
            assert_eq!(result.state, state);
        }
    }

    #[test]
    fn finalize_books_date_and_resets() {
        let mut state = apply(ready_for_review(), WizardEvent::Continue);
        state.booking.phone = "11999998888".into();
        let state = apply(state, WizardEvent::RequestConfirmation);
        let expected = state.booking.clone();

        let result = transition(state, WizardEvent::Finalize);
        assert_eq!(result.outcome, Outcome::Submitted(expected));
        assert_eq!(result.state.step, WizardStep::Calendar);
        assert!(!result.state.confirmation_open);
        assert!(result.state.booking.is_empty());
        assert_eq!(result.state.booked.as_slice(), &[date(15)]);
    }

    #[test]
    fn cancel_only_closes_dialog() {
        let mut state = apply(ready_for_review(), WizardEvent::Continue);
        state.booking.phone = "11999998888".into();
        let open = apply(state, WizardEvent::RequestConfirmation);

        let closed = apply(open.clone(), WizardEvent::CancelConfirmation);
        assert!(!closed.confirmation_open);
        assert_eq!(closed.step, open.step);
        assert_eq!(closed.booking, open.booking);
        assert_eq!(closed.booked, open.booked);
    }

    #[test]
    fn finalize_without_dialog_is_refused() {
        let state = apply(ready_for_review(), WizardEvent::Continue);
        let result = transition(state.clone(), WizardEvent::Finalize);
        assert_eq!(result.outcome, Outcome::Rejected(Rejection::DialogClosed));
        assert_eq!(result.state, state);
    }

    #[test]
    fn updates_are_refused_outside_forms() {
        let result = transition(
            at_step(WizardStep::Calendar),
            WizardEvent::Update(BookingUpdate::new().address("Rua das Flores")),
        );
        assert!(result.outcome.is_rejected());
        assert!(result.state.booking.is_empty());
    }

    #[test]
    fn updates_cannot_move_the_date() {
        let state = ready_for_review();
        let result = transition(
            state.clone(),
            WizardEvent::Update(BookingUpdate::new().date(date(20)).phone("11999998888")),
        );
        assert_eq!(result.outcome, Outcome::Rejected(Rejection::DateNotEditable));
        assert_eq!(result.state, state);
    }

    #[test]
    fn finalize_refuses_a_date_booked_meanwhile() {
        let mut state = apply(ready_for_review(), WizardEvent::Continue);
        state.booking.phone = "11999998888".into();
        let mut open = apply(state, WizardEvent::RequestConfirmation);
        open.booked.insert(date(15));

        let result = transition(open.clone(), WizardEvent::Finalize);
        assert_eq!(
            result.outcome,
            Outcome::Rejected(Rejection::DayNotSelectable(date(15)))
        );
        assert_eq!(result.state, open);
        assert_eq!(result.state.booked.len(), 1);
    }

    #[test]
    fn accepts_mirrors_transition_gate() {
        let state = at_step(WizardStep::Details);
        assert!(!state.accepts(&WizardEvent::Continue));
        assert!(state.accepts(&WizardEvent::Back));
    }
}
