//! Worked access-control scenarios

use clearance_authorization::{
    can_read, can_write, decide, filter_grants_at_or_below, highest_readable_level,
    readable_levels, set_permissions, writable_levels, AccessDecision, AccessScope,
};
use clearance_core::{
    ClassificationLevel::{self, *},
    PermissionAction, PermissionKey, Resource, ResourceId,
};
use clearance_testkit::{admin, cleared_user, user, PrincipalBuilder};

#[test]
fn secret_analyst_reads_through_secret_but_writes_only_unclassified() {
    let analyst = user(
        "analyst",
        Secret,
        &["read_0", "read_1", "read_2", "write_0"],
    );

    assert!(can_read(&analyst, Secret));
    assert!(!can_read(&analyst, TopSecret));
    assert!(!can_write(&analyst, Secret));
    assert_eq!(readable_levels(&analyst), vec![Unclassified, Confidential, Secret]);
    assert_eq!(writable_levels(&analyst), vec![Unclassified]);

    assert_eq!(
        decide(&analyst, PermissionAction::Read, TopSecret),
        AccessDecision::AboveClearance
    );
    assert_eq!(
        decide(&analyst, PermissionAction::Write, Secret),
        AccessDecision::MissingGrant
    );
}

#[test]
fn clearance_without_grants_reads_nothing() {
    let cleared = user("cleared", TopSecret, &[]);

    assert!(!can_read(&cleared, Unclassified));
    assert!(readable_levels(&cleared).is_empty());
    assert_eq!(highest_readable_level(&cleared), None);
}

#[test]
fn fully_granted_user_reads_and_writes_to_the_ceiling() {
    let officer = cleared_user("officer", Secret);

    assert_eq!(readable_levels(&officer), vec![Unclassified, Confidential, Secret]);
    assert_eq!(writable_levels(&officer), readable_levels(&officer));
    assert_eq!(highest_readable_level(&officer), Some(Secret));
    assert!(!can_write(&officer, TopSecret));
}

#[test]
fn inactive_flag_does_not_change_the_decision() {
    let retired = PrincipalBuilder::new("retired")
        .clearance(Confidential)
        .grants(&["read_0", "read_1"])
        .inactive()
        .build();

    assert!(!retired.active);
    assert!(can_read(&retired, Confidential));
    assert_eq!(
        decide(&retired, PermissionAction::Write, Unclassified),
        AccessDecision::MissingGrant
    );
}

#[test]
fn out_of_range_level_is_dropped_from_replacement() {
    let admin = admin();
    let mut target = user("target", TopSecret, &["write_1"]);

    let records = set_permissions(&mut target, ["read_0", "read_5"], &admin).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, PermissionKey::read(Unclassified));
    assert_eq!(records[0].granted_by, admin.id);
    assert_eq!(
        target.grants.iter().copied().collect::<Vec<_>>(),
        vec![PermissionKey::read(Unclassified)]
    );
}

#[test]
fn padded_or_signed_levels_are_not_in_the_vocabulary() {
    let admin = admin();
    let mut target = user("target", TopSecret, &["read_1"]);

    let records =
        set_permissions(&mut target, ["read_02", "write_+1", "read_ 1", "read_0 "], &admin).unwrap();

    assert!(records.is_empty());
    assert!(target.grants.is_empty());
    assert!(readable_levels(&target).is_empty());
}

#[test]
fn lowering_clearance_drops_submitted_grants_above_it() {
    let admin = admin();
    let mut target = user("target", TopSecret, &["write_3"]);

    let new_clearance = Confidential;
    let submitted = ["read_0", "read_1", "write_1", "write_3"];
    let within = filter_grants_at_or_below(submitted, new_clearance);
    target.clearance = new_clearance;
    set_permissions(&mut target, within, &admin).unwrap();

    assert!(!target.holds(PermissionKey::write(TopSecret)));
    assert!(writable_levels(&target)
        .iter()
        .all(|level| *level <= Confidential));
    assert_eq!(writable_levels(&target), vec![Confidential]);
}

#[test]
fn stale_grant_above_clearance_is_never_effective() {
    let demoted = user("demoted", Unclassified, &["read_0", "read_3"]);

    assert!(demoted.holds(PermissionKey::read(TopSecret)));
    assert!(!can_read(&demoted, TopSecret));
    assert_eq!(readable_levels(&demoted), vec![Unclassified]);
}

#[test]
fn scope_limits_catalog_listing() {
    let analyst = user("analyst", Secret, &["read_0", "read_2", "write_0"]);
    let catalog: Vec<Resource> = ClassificationLevel::ALL
        .iter()
        .map(|level| Resource::new(ResourceId::new(), *level))
        .collect();

    let visible = AccessScope::readable(&analyst).filter(&catalog);
    let levels: Vec<_> = visible.iter().map(|doc| doc.classification).collect();
    assert_eq!(levels, vec![Unclassified, Secret]);

    let editable = AccessScope::writable(&analyst).filter(&catalog);
    assert_eq!(editable.len(), 1);
    assert_eq!(AccessScope::readable(&analyst).ordinals(), vec![0, 2]);
}
