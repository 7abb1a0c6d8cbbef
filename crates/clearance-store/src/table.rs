//! Principal table shared by the store handlers
//!
//! Plain synchronous state. Handlers wrap it in a lock and decide how a
//! mutated copy is published; the table itself only guarantees that a
//! failed operation leaves it unchanged.

use std::collections::BTreeMap;

use clearance_core::effects::ensure_owned_by;
use clearance_core::{
    ClearanceError, GrantSet, PermissionGrant, Principal, PrincipalChange, PrincipalId, Result,
};
use serde::{Deserialize, Serialize};

const SNAPSHOT_VERSION: u32 = 1;

/// A principal together with its grant records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPrincipal {
    /// Principal value; its grant set mirrors `grants`
    pub principal: Principal,
    /// Grant records with provenance, in canonical key order
    pub grants: Vec<PermissionGrant>,
}

impl StoredPrincipal {
    fn new(mut principal: Principal, mut grants: Vec<PermissionGrant>) -> Result<Self> {
        ensure_owned_by(principal.id, &grants)?;
        normalize(&mut grants);
        principal.grants = grants.iter().map(|grant| grant.key).collect::<GrantSet>();
        Ok(Self { principal, grants })
    }
}

/// Serialized form of a [`PrincipalTable`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version
    pub version: u32,
    /// Every stored principal
    pub principals: Vec<StoredPrincipal>,
}

/// In-memory principal state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Snapshot", try_from = "Snapshot")]
pub struct PrincipalTable {
    entries: BTreeMap<PrincipalId, StoredPrincipal>,
}

impl PrincipalTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of principals
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Principal by id
    pub fn get(&self, id: PrincipalId) -> Option<&Principal> {
        self.entries.get(&id).map(|entry| &entry.principal)
    }

    /// Principal by username
    pub fn find_by_username(&self, username: &str) -> Option<&Principal> {
        self.entries
            .values()
            .map(|entry| &entry.principal)
            .find(|principal| principal.username == username)
    }

    /// All principals ordered by username
    pub fn list(&self) -> Vec<Principal> {
        let mut principals: Vec<_> = self
            .entries
            .values()
            .map(|entry| entry.principal.clone())
            .collect();
        principals.sort_by(|a, b| a.username.cmp(&b.username));
        principals
    }

    /// Grant records for `id`
    pub fn grant_records(&self, id: PrincipalId) -> Result<Vec<PermissionGrant>> {
        self.entries
            .get(&id)
            .map(|entry| entry.grants.clone())
            .ok_or_else(|| ClearanceError::not_found(format!("Principal {id}")))
    }

    /// Add a principal; id and username must be unused
    pub fn insert(&mut self, principal: Principal, grants: Vec<PermissionGrant>) -> Result<()> {
        if self.entries.contains_key(&principal.id) {
            return Err(ClearanceError::invalid(format!(
                "Principal {} already exists",
                principal.id
            )));
        }
        if self.find_by_username(&principal.username).is_some() {
            return Err(ClearanceError::invalid(format!(
                "Username '{}' already taken",
                principal.username
            )));
        }

        let entry = StoredPrincipal::new(principal, grants)?;
        self.entries.insert(entry.principal.id, entry);
        Ok(())
    }

    /// Apply `change` to `id` and return the updated principal
    pub fn commit(&mut self, id: PrincipalId, change: PrincipalChange) -> Result<Principal> {
        change.validate_for(id)?;
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| ClearanceError::not_found(format!("Principal {id}")))?;

        if let Some(mut grants) = change.apply_to(&mut entry.principal) {
            normalize(&mut grants);
            entry.grants = grants;
        }
        Ok(entry.principal.clone())
    }
}

fn normalize(grants: &mut Vec<PermissionGrant>) {
    // One record per key; the first attribution wins.
    grants.sort_by_key(|grant| grant.key);
    grants.dedup_by_key(|grant| grant.key);
}

impl From<PrincipalTable> for Snapshot {
    fn from(table: PrincipalTable) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            principals: table.entries.into_values().collect(),
        }
    }
}

impl TryFrom<Snapshot> for PrincipalTable {
    type Error = ClearanceError;

    fn try_from(snapshot: Snapshot) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(ClearanceError::serialization(format!(
                "Unsupported snapshot version {}",
                snapshot.version
            )));
        }

        let mut table = Self::new();
        for stored in snapshot.principals {
            table.insert(stored.principal, stored.grants)?;
        }
        Ok(table)
    }
}
