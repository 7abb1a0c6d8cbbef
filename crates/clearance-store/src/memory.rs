//! In-memory principal store

use std::sync::Arc;

use async_trait::async_trait;
use clearance_core::{
    PermissionGrant, Principal, PrincipalChange, PrincipalId, PrincipalStore, Result,
};
use tokio::sync::RwLock;

use crate::table::PrincipalTable;

/// Principal store held entirely in memory
///
/// Every commit runs under one write lock, so readers observe either the
/// state before a grant-set replacement or the state after it. Clones share
/// the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrincipalStore {
    table: Arc<RwLock<PrincipalTable>>,
}

impl MemoryPrincipalStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store over an existing table
    pub fn from_table(table: PrincipalTable) -> Self {
        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> PrincipalTable {
        self.table.read().await.clone()
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipalStore {
    async fn load(&self, id: PrincipalId) -> Result<Option<Principal>> {
        Ok(self.table.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>> {
        Ok(self.table.read().await.find_by_username(username).cloned())
    }

    async fn list(&self) -> Result<Vec<Principal>> {
        Ok(self.table.read().await.list())
    }

    async fn insert(&self, principal: Principal, grants: Vec<PermissionGrant>) -> Result<()> {
        self.table.write().await.insert(principal, grants)
    }

    async fn commit(&self, id: PrincipalId, change: PrincipalChange) -> Result<Principal> {
        let updated = self.table.write().await.commit(id, change)?;
        tracing::debug!(principal = %id, grants = updated.grants.len(), "Principal committed");
        Ok(updated)
    }

    async fn grant_records(&self, id: PrincipalId) -> Result<Vec<PermissionGrant>> {
        self.table.read().await.grant_records(id)
    }
}
