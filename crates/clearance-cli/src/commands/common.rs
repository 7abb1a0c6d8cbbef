// Shared command plumbing
//
// Opens the snapshot store, wires the audit sink, and resolves principals
// named on the command line.

use std::sync::Arc;

use anyhow::{Context, Result};
use clearance_authorization::{readable_levels, writable_levels, PermissionAdministrator};
use clearance_core::{AuditSink, Principal, PrincipalId, PrincipalStore};
use clearance_store::{FilePrincipalStore, TracingAuditSink};

use crate::config::CliConfig;

/// Store and sink for one CLI invocation
pub struct Session {
    pub store: Arc<FilePrincipalStore>,
    pub audit: Option<Arc<dyn AuditSink>>,
    pub config: CliConfig,
}

impl Session {
    pub async fn open(config: &CliConfig) -> Result<Self> {
        let store = FilePrincipalStore::open(&config.store_path)
            .await
            .with_context(|| {
                format!("Failed to open principal store {}", config.store_path.display())
            })?;
        let audit: Option<Arc<dyn AuditSink>> = if config.audit {
            Some(Arc::new(TracingAuditSink::new()))
        } else {
            None
        };

        Ok(Self {
            store: Arc::new(store),
            audit,
            config: config.clone(),
        })
    }

    pub fn administrator(&self) -> PermissionAdministrator<FilePrincipalStore> {
        let admin = PermissionAdministrator::new(self.store.clone());
        match &self.audit {
            Some(sink) => admin.with_audit(sink.clone()),
            None => admin,
        }
    }

    pub fn audit_sink(&self) -> Option<&dyn AuditSink> {
        self.audit.as_deref()
    }

    /// Principal acting for this invocation: `--as`, else the configured admin
    pub async fn acting(&self, acting_as: Option<&str>) -> Result<Principal> {
        let username = acting_as.unwrap_or(&self.config.admin_username);
        self.store
            .find_by_username(username)
            .await?
            .with_context(|| format!("Acting principal '{username}' not found; run `clearance init`"))
    }

    /// Look up a principal by username or id
    pub async fn resolve(&self, who: &str) -> Result<Principal> {
        if let Some(principal) = self.store.find_by_username(who).await? {
            return Ok(principal);
        }
        if let Ok(id) = who.parse::<PrincipalId>() {
            if let Some(principal) = self.store.load(id).await? {
                return Ok(principal);
            }
        }
        anyhow::bail!("Principal '{who}' not found")
    }
}

pub fn print_principal(principal: &Principal) {
    println!("{} ({})", principal.username, principal.id);
    println!("  Role:      {}", principal.role);
    println!(
        "  Clearance: {} [{}]",
        principal.clearance,
        principal.clearance.tone()
    );
    println!("  Active:    {}", principal.active);
    if principal.grants.is_empty() {
        println!("  Grants:    none");
    } else {
        let keys: Vec<String> = principal.grants.iter().map(ToString::to_string).collect();
        println!("  Grants:    {}", keys.join(", "));
    }
    println!("  Readable:  {}", format_levels(&readable_levels(principal)));
    println!("  Writable:  {}", format_levels(&writable_levels(principal)));
}

pub fn format_levels(levels: &[clearance_core::ClassificationLevel]) -> String {
    if levels.is_empty() {
        return "none".to_string();
    }
    levels
        .iter()
        .map(|level| format!("{} ({})", level, level.ordinal()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearance_authorization::bootstrap_admin;

    fn config_in(dir: &tempfile::TempDir) -> CliConfig {
        CliConfig {
            store_path: dir.path().join("principals.json"),
            audit: false,
            ..CliConfig::default()
        }
    }

    #[tokio::test]
    async fn acting_defaults_to_configured_admin() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(&config_in(&dir)).await.unwrap();
        assert!(session.acting(None).await.is_err());

        let admin = bootstrap_admin(session.store.as_ref(), "admin").await.unwrap();
        assert_eq!(session.acting(None).await.unwrap(), admin);
        assert!(session.acting(Some("nobody")).await.is_err());
    }

    #[tokio::test]
    async fn resolve_accepts_username_or_id() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(&config_in(&dir)).await.unwrap();
        let admin = bootstrap_admin(session.store.as_ref(), "admin").await.unwrap();

        assert_eq!(session.resolve("admin").await.unwrap(), admin);
        assert_eq!(session.resolve(&admin.id.to_string()).await.unwrap(), admin);
        assert!(session.resolve("ghost").await.is_err());
    }

    #[test]
    fn empty_level_list_prints_none() {
        use clearance_core::ClassificationLevel;

        assert_eq!(format_levels(&[]), "none");
        assert_eq!(
            format_levels(&[ClassificationLevel::Unclassified, ClassificationLevel::Secret]),
            "Unclassified (0), Secret (2)"
        );
    }
}
