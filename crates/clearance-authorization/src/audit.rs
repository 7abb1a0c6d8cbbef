//! Audited access checks
//!
//! Callers that gate a visible action (open, download, edit) use these
//! wrappers so the decision and its reason reach the audit sink. The
//! predicates in [`crate::evaluator`] stay side-effect free.

use clearance_core::{AuditEvent, AuditSink, Classified, PermissionAction, PermissionKey, Principal};

use crate::evaluator::decide;

/// Decide `action` on `resource` and record the outcome
pub fn audited_check<R: Classified + ?Sized>(
    sink: &dyn AuditSink,
    principal: &Principal,
    action: PermissionAction,
    resource: &R,
) -> bool {
    let level = resource.classification();
    let decision = decide(principal, action, level);
    sink.record(AuditEvent::AccessChecked {
        principal: principal.id,
        key: PermissionKey::new(action, level),
        allowed: decision.is_allowed(),
        detail: decision.reason().to_string(),
    });
    decision.is_allowed()
}

/// Audited [`crate::can_read`]
pub fn audited_read<R: Classified + ?Sized>(
    sink: &dyn AuditSink,
    principal: &Principal,
    resource: &R,
) -> bool {
    audited_check(sink, principal, PermissionAction::Read, resource)
}

/// Audited [`crate::can_write`]
pub fn audited_write<R: Classified + ?Sized>(
    sink: &dyn AuditSink,
    principal: &Principal,
    resource: &R,
) -> bool {
    audited_check(sink, principal, PermissionAction::Write, resource)
}
