//! Access decisions
//!
//! Pure predicates over a principal's clearance and grants. A level is
//! reachable only when it is at or below the clearance ceiling **and** an
//! explicit grant for the action exists at that level:
//!
//! ```text
//! clearance  ──►  ceiling check  ──► AboveClearance
//!                      │
//! grants     ──►  grant lookup   ──► MissingGrant
//!                      │
//!                   Allowed
//! ```
//!
//! Nothing here errors or performs I/O. Denials are `false`; callers decide
//! how to surface them.

use clearance_core::{
    ClassificationLevel, ClearanceError, PermissionAction, PermissionKey, Principal, PrincipalId,
    Result,
};
use serde::{Deserialize, Serialize};

/// Outcome of evaluating one (action, level) request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// Clearance suffices and a grant exists
    Allowed,
    /// The level is above the principal's clearance
    AboveClearance,
    /// Clearance suffices but no grant for the action exists at the level
    MissingGrant,
}

impl AccessDecision {
    /// Whether access is permitted
    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }

    /// Short reason, suitable for audit details
    pub fn reason(self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::AboveClearance => "level above clearance",
            Self::MissingGrant => "no grant at level",
        }
    }
}

/// Evaluate `action` at `level` for `principal`
pub fn decide(
    principal: &Principal,
    action: PermissionAction,
    level: ClassificationLevel,
) -> AccessDecision {
    if level > principal.clearance {
        AccessDecision::AboveClearance
    } else if principal.holds(PermissionKey::new(action, level)) {
        AccessDecision::Allowed
    } else {
        AccessDecision::MissingGrant
    }
}

/// Whether `principal` may perform `action` at `level`
pub fn is_permitted(
    principal: &Principal,
    action: PermissionAction,
    level: ClassificationLevel,
) -> bool {
    decide(principal, action, level).is_allowed()
}

/// Whether `principal` may read resources classified at `level`
pub fn can_read(principal: &Principal, level: ClassificationLevel) -> bool {
    is_permitted(principal, PermissionAction::Read, level)
}

/// Whether `principal` may write resources classified at `level`
pub fn can_write(principal: &Principal, level: ClassificationLevel) -> bool {
    is_permitted(principal, PermissionAction::Write, level)
}

/// Levels at which `principal` may perform `action`, ascending
///
/// Grants above the clearance ceiling are held but never effective, so they
/// are excluded here.
pub fn effective_levels(principal: &Principal, action: PermissionAction) -> Vec<ClassificationLevel> {
    // Grant sets iterate in (level, action) order, so the result is sorted.
    principal
        .granted_levels(action)
        .filter(|level| *level <= principal.clearance)
        .collect()
}

/// Levels `principal` may read, ascending
pub fn readable_levels(principal: &Principal) -> Vec<ClassificationLevel> {
    effective_levels(principal, PermissionAction::Read)
}

/// Levels `principal` may write, ascending
pub fn writable_levels(principal: &Principal) -> Vec<ClassificationLevel> {
    effective_levels(principal, PermissionAction::Write)
}

/// Highest level `principal` may read, `None` when nothing is readable
pub fn highest_readable_level(principal: &Principal) -> Option<ClassificationLevel> {
    readable_levels(principal).last().copied()
}

/// Whether `principal` holds the admin role
pub fn is_admin(principal: &Principal) -> bool {
    principal.is_admin()
}

/// Fail with `Unauthorized` unless `principal` is an admin
pub fn require_admin(principal: &Principal, operation: &str) -> Result<()> {
    if principal.is_admin() {
        Ok(())
    } else {
        tracing::warn!(
            principal = %principal.id,
            username = %principal.username,
            operation,
            "Admin operation refused"
        );
        Err(ClearanceError::unauthorized(format!(
            "{operation} requires admin role, {} is {}",
            principal.username, principal.role
        )))
    }
}

/// Whether `principal` may moderate content owned by `owner`
///
/// Owners may always act on their own content; admins on anyone's.
pub fn can_moderate(principal: &Principal, owner: PrincipalId) -> bool {
    principal.id == owner || principal.is_admin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearance_core::Role;
    use clearance_core::ClassificationLevel::*;

    fn principal(clearance: ClassificationLevel, grants: &[&str]) -> Principal {
        Principal::new(PrincipalId::from_label("subject"), "subject")
            .with_clearance(clearance)
            .with_grants(grants.iter().map(|raw| raw.parse::<PermissionKey>().unwrap()))
    }

    #[test]
    fn ceiling_is_checked_before_grants() {
        let p = principal(Confidential, &["read_3"]);
        assert_eq!(
            decide(&p, PermissionAction::Read, TopSecret),
            AccessDecision::AboveClearance
        );
        assert_eq!(
            decide(&p, PermissionAction::Read, Confidential),
            AccessDecision::MissingGrant
        );
    }

    #[test]
    fn mixed_grants_scenario() {
        let p = principal(Secret, &["read_0", "read_1", "read_2", "write_0"]);
        assert!(can_read(&p, Secret));
        assert!(!can_read(&p, TopSecret));
        assert!(!can_write(&p, Secret));
        assert!(can_write(&p, Unclassified));
        assert_eq!(readable_levels(&p), vec![Unclassified, Confidential, Secret]);
        assert_eq!(writable_levels(&p), vec![Unclassified]);
    }

    #[test]
    fn clearance_alone_grants_nothing() {
        let p = principal(TopSecret, &[]);
        for level in ClassificationLevel::ALL {
            assert!(!can_read(&p, level));
            assert!(!can_write(&p, level));
        }
        assert!(readable_levels(&p).is_empty());
        assert_eq!(highest_readable_level(&p), None);
    }

    #[test]
    fn stale_grants_above_clearance_are_ignored() {
        let p = principal(Unclassified, &["read_0", "read_2", "write_3"]);
        assert_eq!(readable_levels(&p), vec![Unclassified]);
        assert!(writable_levels(&p).is_empty());
        assert_eq!(highest_readable_level(&p), Some(Unclassified));
    }

    #[test]
    fn require_admin_refuses_users() {
        let user = principal(TopSecret, &[]);
        let err = require_admin(&user, "set_permissions").unwrap_err();
        assert!(err.is_unauthorized());

        let admin = user.with_role(Role::Admin);
        assert!(require_admin(&admin, "set_permissions").is_ok());
    }

    #[test]
    fn moderation_is_owner_or_admin() {
        let user = principal(Unclassified, &[]);
        let other = PrincipalId::from_label("other");
        assert!(can_moderate(&user, user.id));
        assert!(!can_moderate(&user, other));
        assert!(can_moderate(&user.with_role(Role::Admin), other));
    }
}
