//! Identifier types for principals and classified resources

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::ClearanceError;

/// Principal identifier
///
/// Stable identity of an account; usernames may change, ids do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrincipalId(pub Uuid);

impl PrincipalId {
    /// Create a new random principal ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive a deterministic ID from a seed label
    ///
    /// Used by fixtures and bootstrap so the same label always maps to the
    /// same principal.
    pub fn from_label(label: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, label.as_bytes()))
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PrincipalId {
    type Err = ClearanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ClearanceError::invalid(format!("Invalid principal id '{s}': {e}")))
    }
}

impl From<Uuid> for PrincipalId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Classified resource identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(pub Uuid);

impl ResourceId {
    /// Create a new random resource ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_ids_are_deterministic() {
        assert_eq!(
            PrincipalId::from_label("admin"),
            PrincipalId::from_label("admin")
        );
        assert_ne!(
            PrincipalId::from_label("admin"),
            PrincipalId::from_label("analyst")
        );
    }

    #[test]
    fn principal_id_parses_its_display_form() {
        let id = PrincipalId::new();
        let parsed: PrincipalId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn principal_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<PrincipalId>().is_err());
    }
}
