//! JSON snapshot principal store
//!
//! Keeps the table in memory and rewrites the whole snapshot on every
//! mutation. A mutation is applied to a copy, the copy is written to a
//! sibling temp file and renamed over the snapshot, and only then is the
//! copy published in memory. A failed write leaves both the file and the
//! in-memory state as they were.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use clearance_core::{
    PermissionGrant, Principal, PrincipalChange, PrincipalId, PrincipalStore, Result,
};
use tokio::fs;
use tokio::sync::RwLock;

use crate::table::PrincipalTable;

/// Principal store persisted as a JSON snapshot file
#[derive(Debug)]
pub struct FilePrincipalStore {
    path: PathBuf,
    table: RwLock<PrincipalTable>,
}

impl FilePrincipalStore {
    /// Open the snapshot at `path`, starting empty if it does not exist
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let table = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No snapshot yet, starting empty");
                PrincipalTable::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), principals = table.len(), "Snapshot loaded");
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    /// Snapshot location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current state even if nothing changed
    pub async fn flush(&self) -> Result<()> {
        let table = self.table.read().await;
        persist(&self.path, &table).await
    }

    async fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut PrincipalTable) -> Result<T>,
    ) -> Result<T> {
        let mut guard = self.table.write().await;
        let mut next = guard.clone();
        let outcome = apply(&mut next)?;
        persist(&self.path, &next).await?;
        *guard = next;
        Ok(outcome)
    }
}

async fn persist(path: &Path, table: &PrincipalTable) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let bytes = serde_json::to_vec_pretty(table)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    tracing::trace!(path = %path.display(), "Snapshot written");
    Ok(())
}

#[async_trait]
impl PrincipalStore for FilePrincipalStore {
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
        self.mutate(|table| table.insert(principal, grants)).await
    }

    async fn commit(&self, id: PrincipalId, change: PrincipalChange) -> Result<Principal> {
        self.mutate(|table| table.commit(id, change)).await
    }

    async fn grant_records(&self, id: PrincipalId) -> Result<Vec<PermissionGrant>> {
        self.table.read().await.grant_records(id)
    }
}
