//! Grant-set derivation
//!
//! Admin submissions arrive as raw permission keys (checkbox values such as
//! `read_2`). Replacement keeps only keys from the canonical vocabulary and
//! drops everything else without failing the request; the single-key
//! [`grant_permission`] path is strict instead.
//!
//! Every mutation here builds the complete new grant set first and swaps it
//! into the principal in one assignment, so a caller never holds a
//! half-replaced principal. Persisting the result is the store's job.

use clearance_core::{
    ClassificationLevel, GrantSet, PermissionAction, PermissionGrant, PermissionKey, Principal,
    PrincipalId, Result,
};

use crate::evaluator::require_admin;

/// A requested grant whose level can be compared against a ceiling
pub trait RequestedGrant {
    /// Ordinal level the request targets, `None` when it names no level
    fn requested_level(&self) -> Option<i64>;
}

impl RequestedGrant for PermissionKey {
    fn requested_level(&self) -> Option<i64> {
        Some(i64::from(self.level.ordinal()))
    }
}

impl RequestedGrant for PermissionGrant {
    fn requested_level(&self) -> Option<i64> {
        self.key.requested_level()
    }
}

impl RequestedGrant for str {
    /// Level suffix of a raw key, parsed leniently so that out-of-range
    /// levels such as `read_7` still compare against the ceiling
    fn requested_level(&self) -> Option<i64> {
        self.rsplit_once('_')
            .and_then(|(_, level)| level.trim().parse::<i64>().ok())
    }
}

impl RequestedGrant for String {
    fn requested_level(&self) -> Option<i64> {
        self.as_str().requested_level()
    }
}

impl<T: RequestedGrant + ?Sized> RequestedGrant for &T {
    fn requested_level(&self) -> Option<i64> {
        (**self).requested_level()
    }
}

/// Drop every requested grant whose level exceeds `ceiling`
///
/// Used when an admin submits grants together with a new clearance, so
/// nothing is granted above the clearance being set in the same change.
/// Raw keys without a parseable level are kept; vocabulary filtering is left
/// to [`set_permissions`].
pub fn filter_grants_at_or_below<G: RequestedGrant>(
    requested: impl IntoIterator<Item = G>,
    ceiling: ClassificationLevel,
) -> Vec<G> {
    let ceiling = i64::from(ceiling.ordinal());
    requested
        .into_iter()
        .filter(|grant| grant.requested_level().map_or(true, |level| level <= ceiling))
        .collect()
}

/// Parse raw keys into a grant set, silently dropping anything outside the
/// canonical vocabulary
pub fn canonical_grants<S: AsRef<str>>(requested: impl IntoIterator<Item = S>) -> GrantSet {
    requested
        .into_iter()
        .filter_map(|raw| {
            let raw = raw.as_ref();
            match raw.parse::<PermissionKey>() {
                Ok(key) => Some(key),
                Err(_) => {
                    tracing::debug!(key = raw, "Dropping permission outside vocabulary");
                    None
                }
            }
        })
        .collect()
}

/// Grant records for `keys`, attributed to `granted_by`, in canonical order
pub fn grant_records<'a>(
    principal: PrincipalId,
    keys: impl IntoIterator<Item = &'a PermissionKey>,
    granted_by: PrincipalId,
) -> Vec<PermissionGrant> {
    let mut records: Vec<_> = keys
        .into_iter()
        .map(|key| PermissionGrant::new(principal, *key, granted_by))
        .collect();
    records.sort();
    records.dedup();
    records
}

/// Every action at every level up to and including `clearance`
pub fn full_grant_set(clearance: ClassificationLevel) -> GrantSet {
    PermissionKey::all_at_or_below(clearance).collect()
}

/// Replace `principal`'s entire grant set with the valid subset of `requested`
///
/// Requires `acting` to be an admin; otherwise returns `Unauthorized` and
/// leaves `principal` untouched. Keys outside the vocabulary are dropped.
/// Returns the new grants attributed to `acting`.
pub fn set_permissions<S: AsRef<str>>(
    principal: &mut Principal,
    requested: impl IntoIterator<Item = S>,
    acting: &Principal,
) -> Result<Vec<PermissionGrant>> {
    require_admin(acting, "set_permissions")?;
    Ok(replace_grant_set(principal, canonical_grants(requested), acting))
}

/// Replace `principal`'s grants with both actions at every level up to
/// `clearance`
///
/// The principal's own clearance is not changed; clearance and grants are
/// set independently.
pub fn grant_all_at_clearance(
    principal: &mut Principal,
    clearance: ClassificationLevel,
    acting: &Principal,
) -> Result<Vec<PermissionGrant>> {
    require_admin(acting, "grant_all_at_clearance")?;
    Ok(replace_grant_set(principal, full_grant_set(clearance), acting))
}

/// Add a single grant
///
/// Unlike [`set_permissions`], an invalid key is an `InvalidPermission`
/// error. Returns `false` when the grant already existed.
pub fn grant_permission(principal: &mut Principal, raw: &str, acting: &Principal) -> Result<bool> {
    require_admin(acting, "grant_permission")?;
    let key: PermissionKey = raw.parse()?;
    let added = principal.grants.insert(key);
    if added {
        tracing::debug!(principal = %principal.id, %key, granted_by = %acting.id, "Permission granted");
    }
    Ok(added)
}

/// Remove a single grant, returning whether it was held
pub fn revoke_permission(
    principal: &mut Principal,
    key: PermissionKey,
    acting: &Principal,
) -> Result<bool> {
    require_admin(acting, "revoke_permission")?;
    let removed = principal.grants.remove(&key);
    if removed {
        tracing::debug!(principal = %principal.id, %key, revoked_by = %acting.id, "Permission revoked");
    }
    Ok(removed)
}

/// Remove every grant, returning how many were held
pub fn revoke_all(principal: &mut Principal, acting: &Principal) -> Result<usize> {
    require_admin(acting, "revoke_all")?;
    let revoked = std::mem::take(&mut principal.grants).len();
    tracing::debug!(principal = %principal.id, revoked, revoked_by = %acting.id, "All permissions revoked");
    Ok(revoked)
}

/// Keys held for `action`, ignoring the ceiling
pub fn held_keys(principal: &Principal, action: PermissionAction) -> Vec<PermissionKey> {
    principal
        .grants
        .iter()
        .filter(|key| key.action == action)
        .copied()
        .collect()
}

fn replace_grant_set(
    principal: &mut Principal,
    grants: GrantSet,
    acting: &Principal,
) -> Vec<PermissionGrant> {
    let records = grant_records(principal.id, &grants, acting.id);
    principal.grants = grants;
    tracing::debug!(
        principal = %principal.id,
        granted_by = %acting.id,
        count = records.len(),
        "Grant set replaced"
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearance_core::ClassificationLevel::*;
    use clearance_core::Role;

    fn admin() -> Principal {
        Principal::new(PrincipalId::from_label("admin"), "admin")
            .with_role(Role::Admin)
            .with_clearance(TopSecret)
    }

    fn subject(clearance: ClassificationLevel) -> Principal {
        Principal::new(PrincipalId::from_label("subject"), "subject").with_clearance(clearance)
    }

    fn keys(principal: &Principal) -> Vec<String> {
        principal.grants.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn invalid_keys_are_dropped_silently() {
        let mut p = subject(TopSecret);
        let grants = set_permissions(&mut p, ["read_0", "read_5", "admin_0", "write"], &admin())
            .unwrap();
        assert_eq!(keys(&p), vec!["read_0"]);
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].granted_by, admin().id);
        assert_eq!(grants[0].principal, p.id);
    }

    #[test]
    fn replacement_discards_previous_grants() {
        let mut p = subject(TopSecret).with_grants(PermissionKey::ALL);
        set_permissions(&mut p, ["write_1"], &admin()).unwrap();
        assert_eq!(keys(&p), vec!["write_1"]);
    }

    #[test]
    fn duplicates_collapse() {
        let mut p = subject(Secret);
        let grants = set_permissions(&mut p, ["read_1", "read_1", "read_0"], &admin()).unwrap();
        assert_eq!(keys(&p), vec!["read_0", "read_1"]);
        assert_eq!(grants.len(), 2);
    }

    #[test]
    fn non_admin_cannot_replace() {
        let mut p = subject(Secret).with_grants([PermissionKey::read(Unclassified)]);
        let before = p.clone();
        let err = set_permissions(&mut p, ["read_2"], &subject(TopSecret)).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(p, before);
    }

    #[test]
    fn grant_all_covers_both_actions_up_to_clearance() {
        let mut p = subject(Secret);
        let grants = grant_all_at_clearance(&mut p, Confidential, &admin()).unwrap();
        assert_eq!(keys(&p), vec!["read_0", "write_0", "read_1", "write_1"]);
        assert_eq!(grants.len(), 4);
        assert_eq!(p.clearance, Secret);
    }

    #[test]
    fn filter_drops_grants_above_ceiling() {
        let kept = filter_grants_at_or_below(["read_0", "write_1", "write_3", "read_9"], Confidential);
        assert_eq!(kept, vec!["read_0", "write_1"]);

        let typed = filter_grants_at_or_below(PermissionKey::ALL, Unclassified);
        assert_eq!(
            typed,
            vec![PermissionKey::read(Unclassified), PermissionKey::write(Unclassified)]
        );
    }

    #[test]
    fn filter_keeps_levelless_keys_for_vocabulary_check() {
        let kept = filter_grants_at_or_below(vec!["bogus".to_string()], Unclassified);
        assert_eq!(kept, vec!["bogus".to_string()]);
        assert!(canonical_grants(kept).is_empty());
    }

    #[test]
    fn single_grant_is_strict() {
        let mut p = subject(Secret);
        assert!(grant_permission(&mut p, "read_2", &admin()).unwrap());
        assert!(!grant_permission(&mut p, "read_2", &admin()).unwrap());
        let err = grant_permission(&mut p, "read_5", &admin()).unwrap_err();
        assert!(matches!(
            err,
            clearance_core::ClearanceError::InvalidPermission { .. }
        ));
    }

    #[test]
    fn revocation() {
        let mut p = subject(Secret).with_grants(full_grant_set(Secret));
        assert!(revoke_permission(&mut p, PermissionKey::write(Secret), &admin()).unwrap());
        assert!(!revoke_permission(&mut p, PermissionKey::write(Secret), &admin()).unwrap());
        assert_eq!(held_keys(&p, PermissionAction::Write).len(), 2);
        assert_eq!(revoke_all(&mut p, &admin()).unwrap(), 5);
        assert!(p.grants.is_empty());
    }
}
