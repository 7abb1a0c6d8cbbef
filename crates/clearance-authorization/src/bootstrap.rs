//! First-run setup
//!
//! Seeds the initial admin and brings principals that predate explicit
//! grants onto the grant model by giving them everything their clearance
//! allows.

use clearance_core::{
    AuditEvent, AuditSink, ClassificationLevel, Principal, PrincipalId, PrincipalStore, Result,
    Role,
};

use crate::grants::{full_grant_set, grant_records};

/// Ensure an admin named `username` exists, creating it at Top Secret with
/// the full vocabulary if needed
///
/// The seeded admin's grants are attributed to itself. An existing principal
/// of that name is returned unchanged, whatever its role; a non-admin
/// namesake is logged as a warning.
pub async fn bootstrap_admin<S: PrincipalStore + ?Sized>(
    store: &S,
    username: &str,
) -> Result<Principal> {
    if let Some(existing) = store.find_by_username(username).await? {
        if existing.is_admin() {
            tracing::info!(username, principal = %existing.id, "Admin already exists");
        } else {
            tracing::warn!(
                username,
                principal = %existing.id,
                role = %existing.role,
                "Principal with the admin username is not an admin"
            );
        }
        return Ok(existing);
    }

    let id = PrincipalId::from_label(username);
    let grants = full_grant_set(ClassificationLevel::MAX);
    let records = grant_records(id, &grants, id);
    let admin = Principal::new(id, username)
        .with_role(Role::Admin)
        .with_clearance(ClassificationLevel::MAX)
        .with_grants(grants);

    store.insert(admin.clone(), records).await?;
    tracing::info!(username, principal = %id, "Admin created");
    Ok(admin)
}

/// Give every principal without grants both actions at every level up to
/// its clearance, attributed to itself
///
/// Principals that already hold any grant are left alone. Returns how many
/// principals were backfilled.
pub async fn backfill_missing_grants<S: PrincipalStore + ?Sized>(
    store: &S,
    audit: Option<&dyn AuditSink>,
) -> Result<usize> {
    let mut backfilled = 0;
    for principal in store.list().await? {
        if !principal.grants.is_empty() {
            continue;
        }

        let grants = full_grant_set(principal.clearance);
        let records = grant_records(principal.id, &grants, principal.id);
        store.replace_grants(principal.id, records).await?;
        tracing::info!(
            principal = %principal.id,
            username = %principal.username,
            clearance = %principal.clearance,
            "Granted permissions at clearance"
        );

        if let Some(sink) = audit {
            sink.record(AuditEvent::GrantsBackfilled {
                principal: principal.id,
                clearance: principal.clearance,
            });
        }
        backfilled += 1;
    }
    Ok(backfilled)
}
