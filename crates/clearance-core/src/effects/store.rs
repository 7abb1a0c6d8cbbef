//! Principal store interface
//!
//! The backing store owns persisted principal and grant state. Its one hard
//! requirement is that [`PrincipalStore::commit`] applies a whole
//! [`PrincipalChange`] atomically: a concurrent reader sees either the old
//! principal or the new one, never a grant set that is half replaced.

use async_trait::async_trait;

use crate::{
    ClassificationLevel, ClearanceError, GrantSet, PermissionGrant, Principal, PrincipalId,
    Result, Role,
};

/// Changes applied to one principal in a single commit
///
/// `None` fields are left untouched. When `grants` is present it replaces
/// the whole grant set (delete-all-then-insert).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrincipalChange {
    /// New role
    pub role: Option<Role>,
    /// New clearance ceiling
    pub clearance: Option<ClassificationLevel>,
    /// New active flag
    pub active: Option<bool>,
    /// Replacement grant set
    pub grants: Option<Vec<PermissionGrant>>,
}

impl PrincipalChange {
    /// A change that only replaces the grant set
    pub fn grants(grants: Vec<PermissionGrant>) -> Self {
        Self {
            grants: Some(grants),
            ..Self::default()
        }
    }

    /// Set the role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the clearance
    pub fn with_clearance(mut self, clearance: ClassificationLevel) -> Self {
        self.clearance = Some(clearance);
        self
    }

    /// Set the active flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Set the replacement grant set
    pub fn with_grants(mut self, grants: Vec<PermissionGrant>) -> Self {
        self.grants = Some(grants);
        self
    }

    /// True when the change would leave the principal untouched
    pub fn is_empty(&self) -> bool {
        self.role.is_none()
            && self.clearance.is_none()
            && self.active.is_none()
            && self.grants.is_none()
    }

    /// Check that every grant record belongs to `id`
    pub fn validate_for(&self, id: PrincipalId) -> Result<()> {
        if let Some(grants) = &self.grants {
            ensure_owned_by(id, grants)?;
        }
        Ok(())
    }

    /// Apply to an in-memory principal
    ///
    /// Callers hold whatever lock makes the commit atomic; this only
    /// computes the new value. Returns the replacement grant records, if
    /// any, so the store can keep provenance alongside the principal.
    pub fn apply_to(self, principal: &mut Principal) -> Option<Vec<PermissionGrant>> {
        if let Some(role) = self.role {
            principal.role = role;
        }
        if let Some(clearance) = self.clearance {
            principal.clearance = clearance;
        }
        if let Some(active) = self.active {
            principal.active = active;
        }
        self.grants.map(|grants| {
            principal.grants = grants.iter().map(|grant| grant.key).collect::<GrantSet>();
            grants
        })
    }
}

/// Reject grant records owned by some other principal
pub fn ensure_owned_by(id: PrincipalId, grants: &[PermissionGrant]) -> Result<()> {
    match grants.iter().find(|grant| grant.principal != id) {
        Some(stray) => Err(ClearanceError::invalid(format!(
            "Grant {} belongs to {}, not {}",
            stray.key, stray.principal, id
        ))),
        None => Ok(()),
    }
}

/// Persistent principal and grant state
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Load a principal by id
    async fn load(&self, id: PrincipalId) -> Result<Option<Principal>>;

    /// Load a principal by username
    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>>;

    /// All principals, ordered by username
    async fn list(&self) -> Result<Vec<Principal>>;

    /// Create a principal together with its initial grant records
    ///
    /// The stored grant set is derived from `grants`; whatever
    /// `principal.grants` held is overwritten. Fails with `Invalid` when the
    /// id or username is already taken.
    async fn insert(&self, principal: Principal, grants: Vec<PermissionGrant>) -> Result<()>;

    /// Apply `change` atomically and return the updated principal
    ///
    /// Fails with `NotFound` for an unknown id.
    async fn commit(&self, id: PrincipalId, change: PrincipalChange) -> Result<Principal>;

    /// Grant records with provenance, in canonical key order
    async fn grant_records(&self, id: PrincipalId) -> Result<Vec<PermissionGrant>>;

    /// Replace the whole grant set in one commit
    async fn replace_grants(
        &self,
        id: PrincipalId,
        grants: Vec<PermissionGrant>,
    ) -> Result<Principal> {
        self.commit(id, PrincipalChange::grants(grants)).await
    }
}
