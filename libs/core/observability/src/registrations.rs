//! Domain counters for event creation, registration and check-in.

use metrics::{counter, histogram};
use std::time::Instant;

pub struct RegistrationMetrics;

impl RegistrationMetrics {
    pub fn record_event_created() {
        counter!("events_created_total").increment(1);
    }

    /// `outcome` is one of `success`, `event_not_found`, `event_full`,
    /// `duplicate_email`, `error`.
    pub fn record_registration(outcome: &'static str) {
        counter!("attendee_registrations_total", "outcome" => outcome).increment(1);
        tracing::debug!(outcome, "Registration attempt recorded");
    }

    /// `outcome` is one of `success`, `attendee_not_found`, `already_checked_in`, `error`.
    pub fn record_check_in(outcome: &'static str) {
        counter!("check_ins_total", "outcome" => outcome).increment(1);
        tracing::debug!(outcome, "Check-in attempt recorded");
    }
}

/// Records `repository_operation_duration_seconds` for `operation` when stopped or dropped.
pub struct OperationTimer {
    start: Instant,
    operation: &'static str,
    stopped: bool,
}

impl OperationTimer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
            stopped: false,
        }
    }

    /// Returns the elapsed time in milliseconds, or 0 if already stopped.
    pub fn stop(&mut self) -> u64 {
        if self.stopped {
            return 0;
        }
        self.stopped = true;

        let duration = self.start.elapsed();
        histogram!("repository_operation_duration_seconds", "operation" => self.operation)
            .record(duration.as_secs_f64());

        duration.as_millis() as u64
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        if !self.stopped {
            self.stop();
        }
    }
}
