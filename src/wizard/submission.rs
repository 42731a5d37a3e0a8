//! Submission events fired when a booking is finalized.
//!
//! There is no backend: a [`SubmissionSink`] receives the event and decides
//! what to do with it. [`LogSink`] emits a structured log line and
//! [`MemorySink`] keeps events around for inspection.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::locale::{summary_lines, Locale};
use crate::domain::BookingRecord;

/// Snapshot of a confirmed booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEvent {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub booking: BookingRecord,
}

impl SubmissionEvent {
    pub fn new(booking: BookingRecord, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at,
            booking,
        }
    }

    /// Plain-text message a human operator would receive for this request.
    pub fn message(&self, locale: Locale) -> String {
        let mut lines = Vec::new();
        lines.push(match locale {
            Locale::PtBr => "Nova solicitação de orçamento".to_string(),
            Locale::EnUs => "New quote request".to_string(),
        });
        for (label, value) in summary_lines(&self.booking, locale) {
            lines.push(format!("{label}: {value}"));
        }
        lines.join("\n")
    }
}

/// Collaborator notified of every finalized booking. No response is expected.
pub trait SubmissionSink {
    fn submit(&mut self, event: &SubmissionEvent);
}

/// Emits each submission as an `info` tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink {
    locale: Locale,
}

impl LogSink {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl SubmissionSink for LogSink {
    fn submit(&mut self, event: &SubmissionEvent) {
        let payload = serde_json::to_string(event).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to serialize submission payload");
            String::new()
        });
        tracing::info!(
            id = %event.id,
            date = ?event.booking.date,
            payload = %payload,
            "booking submitted"
        );
        tracing::debug!(message_body = %event.message(self.locale), "submission message");
    }
}

/// Stores submissions in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Rc<RefCell<Vec<SubmissionEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SubmissionEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SubmissionSink for MemorySink {
    fn submit(&mut self, event: &SubmissionEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
