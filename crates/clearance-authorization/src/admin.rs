//! Store-backed permission administration
//!
//! The admin permission editor: create principals, change their role,
//! clearance, and active flag, and replace their grant sets. Each request
//! is evaluated in memory with the pure functions from [`crate::grants`] and
//! then persisted with a single [`PrincipalStore::commit`], so clearance and
//! grants submitted together land together.
//!
//! Audit events are emitted here, after a successful commit, never from the
//! evaluator. A refused or failed request records nothing.

use std::sync::Arc;

use clearance_core::{
    AuditEvent, AuditSink, ClassificationLevel, ClearanceError, PermissionGrant, Principal,
    PrincipalChange, PrincipalId, PrincipalStore, Result, Role,
};
use serde::{Deserialize, Serialize};

use crate::evaluator::require_admin;
use crate::grants::{filter_grants_at_or_below, grant_all_at_clearance, set_permissions};

/// How the grant set of a new or edited principal is chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantSelection {
    /// Both actions at every level up to the principal's clearance
    AllAtClearance,
    /// Raw keys as submitted; anything above the clearance or outside the
    /// vocabulary is dropped
    Explicit(Vec<String>),
}

impl GrantSelection {
    /// Explicit selection from any string-like keys
    pub fn explicit<S: Into<String>>(keys: impl IntoIterator<Item = S>) -> Self {
        Self::Explicit(keys.into_iter().map(Into::into).collect())
    }
}

/// Request to create a principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPrincipal {
    /// Unique account name
    pub username: String,
    /// Role
    pub role: Role,
    /// Clearance ceiling
    pub clearance: ClassificationLevel,
    /// Initial grants
    pub grants: GrantSelection,
}

/// Request to edit a principal; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalUpdate {
    /// New role
    pub role: Option<Role>,
    /// New clearance ceiling
    pub clearance: Option<ClassificationLevel>,
    /// New active flag
    pub active: Option<bool>,
    /// Replacement grant set, filtered at or below the resulting clearance
    pub grants: Option<GrantSelection>,
}

/// Admin-facing permission editor over a [`PrincipalStore`]
pub struct PermissionAdministrator<S: PrincipalStore + ?Sized> {
    store: Arc<S>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl<S: PrincipalStore + ?Sized> PermissionAdministrator<S> {
    /// Create an administrator without an audit sink
    pub fn new(store: Arc<S>) -> Self {
        Self { store, audit: None }
    }

    /// Attach an audit sink
    pub fn with_audit(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Backing store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Load a principal or fail with `NotFound`
    pub async fn principal(&self, id: PrincipalId) -> Result<Principal> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| ClearanceError::not_found(format!("Principal {id}")))
    }

    /// Load a principal by username or fail with `NotFound`
    pub async fn principal_named(&self, username: &str) -> Result<Principal> {
        self.store
            .find_by_username(username)
            .await?
            .ok_or_else(|| ClearanceError::not_found(format!("Principal '{username}'")))
    }

    /// Create a principal with its initial role, clearance, and grants
    pub async fn provision(&self, acting: &Principal, request: NewPrincipal) -> Result<Principal> {
        require_admin(acting, "provision")?;

        let username = request.username.trim();
        if username.is_empty() {
            return Err(ClearanceError::invalid("Username must not be empty"));
        }
        if self.store.find_by_username(username).await?.is_some() {
            return Err(ClearanceError::invalid(format!(
                "Username '{username}' already taken"
            )));
        }

        let mut principal = Principal::new(PrincipalId::new(), username)
            .with_role(request.role)
            .with_clearance(request.clearance);
        let grants = select_grants(&mut principal, request.grants, request.clearance, acting)?;

        self.store.insert(principal.clone(), grants).await?;
        tracing::info!(
            actor = %acting.id,
            principal = %principal.id,
            username = %principal.username,
            role = %principal.role,
            clearance = %principal.clearance,
            grants = principal.grants.len(),
            "Principal provisioned"
        );

        self.emit(AuditEvent::PrincipalProvisioned {
            actor: acting.id,
            principal: principal.id,
            role: principal.role,
            clearance: principal.clearance,
            grants: principal.grants.iter().copied().collect(),
        });
        Ok(principal)
    }

    /// Apply role, clearance, active, and grant changes in one commit
    ///
    /// Explicit grants are filtered at or below the clearance the principal
    /// ends up with. When `update.grants` is `None` the existing grants are
    /// kept as they are, even if some now sit above a lowered clearance;
    /// such grants stay ineffective until the next replacement.
    pub async fn update(
        &self,
        acting: &Principal,
        id: PrincipalId,
        update: PrincipalUpdate,
    ) -> Result<Principal> {
        require_admin(acting, "update")?;
        let mut candidate = self.principal(id).await?;

        let clearance = update.clearance.unwrap_or(candidate.clearance);
        let grants = match update.grants {
            Some(selection) => Some(select_grants(&mut candidate, selection, clearance, acting)?),
            None => None,
        };

        let change = PrincipalChange {
            role: update.role,
            clearance: update.clearance,
            active: update.active,
            grants,
        };
        if change.is_empty() {
            return Ok(candidate);
        }

        let updated = self.store.commit(id, change).await?;
        tracing::info!(
            actor = %acting.id,
            principal = %updated.id,
            role = %updated.role,
            clearance = %updated.clearance,
            active = updated.active,
            grants = updated.grants.len(),
            "Principal updated"
        );

        self.emit(AuditEvent::PrincipalUpdated {
            actor: acting.id,
            principal: updated.id,
            role: updated.role,
            clearance: updated.clearance,
            active: updated.active,
            grants: updated.grants.iter().copied().collect(),
        });
        Ok(updated)
    }

    /// Replace a stored grant set; invalid keys are dropped
    pub async fn set_permissions<T: AsRef<str>>(
        &self,
        acting: &Principal,
        id: PrincipalId,
        requested: impl IntoIterator<Item = T>,
    ) -> Result<Vec<PermissionGrant>> {
        require_admin(acting, "set_permissions")?;
        let mut candidate = self.principal(id).await?;
        let grants = set_permissions(&mut candidate, requested, acting)?;
        self.commit_grants(acting, id, grants).await
    }

    /// Replace a stored grant set with everything up to `clearance`
    pub async fn grant_all_at_clearance(
        &self,
        acting: &Principal,
        id: PrincipalId,
        clearance: ClassificationLevel,
    ) -> Result<Vec<PermissionGrant>> {
        require_admin(acting, "grant_all_at_clearance")?;
        let mut candidate = self.principal(id).await?;
        let grants = grant_all_at_clearance(&mut candidate, clearance, acting)?;
        self.commit_grants(acting, id, grants).await
    }

    async fn commit_grants(
        &self,
        acting: &Principal,
        id: PrincipalId,
        grants: Vec<PermissionGrant>,
    ) -> Result<Vec<PermissionGrant>> {
        let updated = self.store.replace_grants(id, grants.clone()).await?;
        tracing::info!(
            actor = %acting.id,
            principal = %id,
            grants = grants.len(),
            "Permissions replaced"
        );

        self.emit(AuditEvent::PermissionsReplaced {
            actor: acting.id,
            principal: id,
            grants: updated.grants.iter().copied().collect(),
        });
        Ok(grants)
    }

    fn emit(&self, event: AuditEvent) {
        if let Some(sink) = &self.audit {
            sink.record(event);
        }
    }
}

/// Resolve a selection into grant records, swapping them into `principal`
fn select_grants(
    principal: &mut Principal,
    selection: GrantSelection,
    clearance: ClassificationLevel,
    acting: &Principal,
) -> Result<Vec<PermissionGrant>> {
    match selection {
        GrantSelection::AllAtClearance => grant_all_at_clearance(principal, clearance, acting),
        GrantSelection::Explicit(raw) => {
            let within = filter_grants_at_or_below(raw, clearance);
            set_permissions(principal, within, acting)
        }
    }
}
