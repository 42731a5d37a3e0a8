#![doc(test(attr(deny(warnings))))]

//! Booking Core implements a site-visit booking wizard: a month calendar for
//! picking a free date, a booking record filled in over a details and a
//! review screen, and a step state machine that ties them together. The
//! `booking_wizard_cli` binary drives it from a terminal.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod time;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Booking Core tracing initialized.");
    });
}
