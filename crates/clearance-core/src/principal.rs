//! Principals and their grants
//!
//! A [`Principal`] is the typed value every authorization decision is made
//! against. It is passed explicitly; there is no ambient current user.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::{ClassificationLevel, ClearanceError, PermissionAction, PermissionKey, PrincipalId};

/// Set of permission keys held by a principal, in canonical order
pub type GrantSet = BTreeSet<PermissionKey>;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular account
    #[default]
    User,
    /// May change clearances and grant sets
    Admin,
}

impl Role {
    /// Lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ClearanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(ClearanceError::invalid(format!("Unknown role: {s}"))),
        }
    }
}

/// Identity with a clearance ceiling and explicit grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable identity
    pub id: PrincipalId,
    /// Unique account name
    pub username: String,
    /// Account role
    #[serde(default)]
    pub role: Role,
    /// Highest level this principal may ever be authorized at
    #[serde(default)]
    pub clearance: ClassificationLevel,
    /// Whether the account may sign in; carried for collaborators, not
    /// consulted by the evaluator
    #[serde(default = "default_active")]
    pub active: bool,
    /// Explicit (action, level) grants
    #[serde(default)]
    pub grants: GrantSet,
}

fn default_active() -> bool {
    true
}

impl Principal {
    /// A freshly created account: user role, clearance 0, no grants
    pub fn new(id: PrincipalId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            role: Role::User,
            clearance: ClassificationLevel::Unclassified,
            active: true,
            grants: GrantSet::new(),
        }
    }

    /// Set the role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the clearance ceiling
    pub fn with_clearance(mut self, clearance: ClassificationLevel) -> Self {
        self.clearance = clearance;
        self
    }

    /// Replace the grants
    pub fn with_grants(mut self, grants: impl IntoIterator<Item = PermissionKey>) -> Self {
        self.grants = grants.into_iter().collect();
        self
    }

    /// Whether the principal holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether an explicit grant exists, ignoring the clearance ceiling
    pub fn holds(&self, key: PermissionKey) -> bool {
        self.grants.contains(&key)
    }

    /// Granted levels for `action`, ignoring the clearance ceiling
    pub fn granted_levels(
        &self,
        action: PermissionAction,
    ) -> impl Iterator<Item = ClassificationLevel> + '_ {
        self.grants
            .iter()
            .filter(move |key| key.action == action)
            .map(|key| key.level)
    }
}

/// A grant record with provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// Owner of the grant
    pub principal: PrincipalId,
    /// What is granted
    pub key: PermissionKey,
    /// Admin who made the grant
    pub granted_by: PrincipalId,
}

impl PermissionGrant {
    /// Create a grant record
    pub fn new(principal: PrincipalId, key: PermissionKey, granted_by: PrincipalId) -> Self {
        Self {
            principal,
            key,
            granted_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_principal_has_no_authority() {
        let p = Principal::new(PrincipalId::from_label("p"), "p");
        assert_eq!(p.role, Role::User);
        assert_eq!(p.clearance, ClassificationLevel::Unclassified);
        assert!(p.grants.is_empty());
        assert!(p.active);
    }

    #[test]
    fn granted_levels_filters_by_action() {
        let p = Principal::new(PrincipalId::from_label("p"), "p").with_grants([
            PermissionKey::read(ClassificationLevel::Secret),
            PermissionKey::write(ClassificationLevel::Unclassified),
            PermissionKey::read(ClassificationLevel::Unclassified),
        ]);
        let reads: Vec<_> = p.granted_levels(PermissionAction::Read).collect();
        assert_eq!(
            reads,
            vec![ClassificationLevel::Unclassified, ClassificationLevel::Secret]
        );
    }

    #[test]
    fn role_parsing() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn principal_json_defaults() {
        let id = PrincipalId::from_label("legacy");
        let json = format!(r#"{{"id":"{id}","username":"legacy"}}"#);
        let p: Principal = serde_json::from_str(&json).unwrap();
        assert_eq!(p, Principal::new(id, "legacy"));
    }
}
