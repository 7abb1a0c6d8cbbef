//! Audit sink that keeps events for assertions

use clearance_core::{AuditEvent, AuditSink};
use parking_lot::Mutex;

/// Collects every recorded event in order
#[derive(Debug, Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl RecordingAuditSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events recorded so far
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().clone()
    }

    /// Number of events recorded so far
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Action names of recorded events, in order
    pub fn actions(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(AuditEvent::action).collect()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, event: AuditEvent) {
        self.events.lock().push(event);
    }
}
