//! Principal builders and fixtures
//!
//! Fixture principals use label-derived ids, so two calls to [`admin`]
//! return the same identity.

use clearance_core::{ClassificationLevel, GrantSet, PermissionKey, Principal, PrincipalId, Role};

/// Builder for test principals
///
/// # Example
/// ```rust
/// use clearance_testkit::PrincipalBuilder;
/// use clearance_core::ClassificationLevel;
///
/// let analyst = PrincipalBuilder::new("analyst")
///     .clearance(ClassificationLevel::Secret)
///     .grants(&["read_0", "read_2"])
///     .build();
/// assert_eq!(analyst.grants.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PrincipalBuilder {
    principal: Principal,
}

impl PrincipalBuilder {
    /// Start from a fresh user named `username`
    pub fn new(username: &str) -> Self {
        Self {
            principal: Principal::new(PrincipalId::from_label(username), username),
        }
    }

    /// Set the role
    pub fn role(mut self, role: Role) -> Self {
        self.principal.role = role;
        self
    }

    /// Make the principal an admin
    pub fn admin(self) -> Self {
        self.role(Role::Admin)
    }

    /// Set the clearance
    pub fn clearance(mut self, clearance: ClassificationLevel) -> Self {
        self.principal.clearance = clearance;
        self
    }

    /// Add grants from canonical keys
    ///
    /// Panics on a key outside the vocabulary; fixtures should be valid.
    #[allow(clippy::expect_used)]
    pub fn grants(mut self, keys: &[&str]) -> Self {
        for raw in keys {
            let key: PermissionKey = raw.parse().expect("fixture permission key");
            self.principal.grants.insert(key);
        }
        self
    }

    /// Add typed grants
    pub fn grant_set(mut self, grants: GrantSet) -> Self {
        self.principal.grants.extend(grants);
        self
    }

    /// Grant everything up to the current clearance
    pub fn all_at_clearance(mut self) -> Self {
        let clearance = self.principal.clearance;
        self.principal
            .grants
            .extend(PermissionKey::all_at_or_below(clearance));
        self
    }

    /// Mark inactive
    pub fn inactive(mut self) -> Self {
        self.principal.active = false;
        self
    }

    /// Finish
    pub fn build(self) -> Principal {
        self.principal
    }
}

/// Admin at Top Secret holding the full vocabulary
pub fn admin() -> Principal {
    PrincipalBuilder::new("admin")
        .admin()
        .clearance(ClassificationLevel::TopSecret)
        .all_at_clearance()
        .build()
}

/// Regular user with the given clearance and grants
pub fn user(username: &str, clearance: ClassificationLevel, grants: &[&str]) -> Principal {
    PrincipalBuilder::new(username)
        .clearance(clearance)
        .grants(grants)
        .build()
}

/// Regular user holding everything up to `clearance`
pub fn cleared_user(username: &str, clearance: ClassificationLevel) -> Principal {
    PrincipalBuilder::new(username)
        .clearance(clearance)
        .all_at_clearance()
        .build()
}
