//! Audit sink interface
//!
//! The evaluator never emits audit records. Callers that gate a visible
//! action on a decision, or that change grants, describe what happened with
//! an [`AuditEvent`] and hand it to whichever sink they were configured with.

use serde::{Deserialize, Serialize};

use crate::{ClassificationLevel, PermissionKey, PrincipalId, Role};

/// Something worth recording about access control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// A read/write check gated a visible action
    AccessChecked {
        /// Principal whose access was checked
        principal: PrincipalId,
        /// Action and level that were checked
        key: PermissionKey,
        /// Outcome
        allowed: bool,
        /// Reason for the outcome
        detail: String,
    },
    /// An admin created a principal
    PrincipalProvisioned {
        /// Acting admin
        actor: PrincipalId,
        /// New principal
        principal: PrincipalId,
        /// Assigned role
        role: Role,
        /// Assigned clearance
        clearance: ClassificationLevel,
        /// Initial grants
        grants: Vec<PermissionKey>,
    },
    /// An admin changed role, clearance, active flag, or grants in one commit
    PrincipalUpdated {
        /// Acting admin
        actor: PrincipalId,
        /// Updated principal
        principal: PrincipalId,
        /// Role after the update
        role: Role,
        /// Clearance after the update
        clearance: ClassificationLevel,
        /// Active flag after the update
        active: bool,
        /// Grants after the update
        grants: Vec<PermissionKey>,
    },
    /// An admin replaced a grant set without touching anything else
    PermissionsReplaced {
        /// Acting admin
        actor: PrincipalId,
        /// Principal whose grants changed
        principal: PrincipalId,
        /// Grants after the replacement
        grants: Vec<PermissionKey>,
    },
    /// A principal with no grants received everything at its clearance
    GrantsBackfilled {
        /// Principal that was backfilled
        principal: PrincipalId,
        /// Clearance the grants were derived from
        clearance: ClassificationLevel,
    },
}

impl AuditEvent {
    /// Short action name, as shown in audit listings
    pub fn action(&self) -> &'static str {
        match self {
            Self::AccessChecked { .. } => "access_check",
            Self::PrincipalProvisioned { .. } => "add_user",
            Self::PrincipalUpdated { .. } => "edit_user",
            Self::PermissionsReplaced { .. } => "set_permissions",
            Self::GrantsBackfilled { .. } => "backfill_permissions",
        }
    }

    /// Principal that caused the event
    pub fn actor(&self) -> PrincipalId {
        match self {
            Self::AccessChecked { principal, .. } | Self::GrantsBackfilled { principal, .. } => {
                *principal
            }
            Self::PrincipalProvisioned { actor, .. }
            | Self::PrincipalUpdated { actor, .. }
            | Self::PermissionsReplaced { actor, .. } => *actor,
        }
    }

    /// Principal the event is about
    pub fn subject(&self) -> PrincipalId {
        match self {
            Self::AccessChecked { principal, .. }
            | Self::PrincipalProvisioned { principal, .. }
            | Self::PrincipalUpdated { principal, .. }
            | Self::PermissionsReplaced { principal, .. }
            | Self::GrantsBackfilled { principal, .. } => *principal,
        }
    }
}

/// Destination for audit events
pub trait AuditSink: Send + Sync {
    /// Record one event
    fn record(&self, event: AuditEvent);
}
