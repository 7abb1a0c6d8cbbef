//! Audit sink that forwards events to `tracing`

use clearance_core::{AuditEvent, AuditSink};

/// Emits audit events on the `clearance::audit` target; denied access
/// checks at `warn`, everything else at `info`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    /// Create the sink
    pub fn new() -> Self {
        Self
    }
}

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AuditEvent) {
        match &event {
            AuditEvent::AccessChecked {
                key,
                allowed: false,
                detail,
                ..
            } => tracing::warn!(
                target: "clearance::audit",
                action = event.action(),
                actor = %event.actor(),
                %key,
                detail = %detail,
                "Access denied"
            ),
            _ => tracing::info!(
                target: "clearance::audit",
                action = event.action(),
                actor = %event.actor(),
                subject = %event.subject(),
                event = ?event,
                "Audit event"
            ),
        }
    }
}
