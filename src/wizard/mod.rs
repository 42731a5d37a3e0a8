//! The booking wizard: step machine, splash timer, submission dispatch and
//! the session that ties them together.

pub mod machine;
pub mod session;
pub mod splash;
pub mod step;
pub mod submission;

pub use machine::{transition, Outcome, Rejection, Transition, WizardEvent, WizardState};
pub use session::BookingSession;
pub use splash::SplashTimer;
pub use step::WizardStep;
pub use submission::{LogSink, MemorySink, SubmissionEvent, SubmissionSink};
