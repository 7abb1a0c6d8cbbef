//! Property tests for the access policy and grant replacement

use clearance_authorization::{
    can_read, can_write, full_grant_set, grant_all_at_clearance, readable_levels,
    set_permissions, writable_levels, ClearanceError,
};
use clearance_core::{ClassificationLevel, PermissionKey};
use clearance_testkit::{admin, arb_level, arb_principal, arb_raw_request, PrincipalBuilder};
use proptest::prelude::*;

proptest! {
    #[test]
    fn decision_is_ceiling_and_grant(principal in arb_principal(), level in arb_level()) {
        prop_assert_eq!(
            can_read(&principal, level),
            level <= principal.clearance && principal.holds(PermissionKey::read(level))
        );
        prop_assert_eq!(
            can_write(&principal, level),
            level <= principal.clearance && principal.holds(PermissionKey::write(level))
        );
    }

    #[test]
    fn readable_levels_stay_under_the_ceiling(principal in arb_principal()) {
        let readable = readable_levels(&principal);
        let expected: Vec<_> = ClassificationLevel::up_to(principal.clearance)
            .filter(|level| principal.holds(PermissionKey::read(*level)))
            .collect();

        prop_assert!(readable.iter().all(|level| *level <= principal.clearance));
        prop_assert!(readable.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(readable, expected);
    }

    #[test]
    fn replacing_twice_matches_replacing_once(
        principal in arb_principal(),
        requested in arb_raw_request(),
    ) {
        let admin = admin();
        let mut once = principal.clone();
        let mut twice = principal;

        let first = set_permissions(&mut once, &requested, &admin).unwrap();
        set_permissions(&mut twice, &requested, &admin).unwrap();
        let second = set_permissions(&mut twice, &requested, &admin).unwrap();

        prop_assert_eq!(&once.grants, &twice.grants);
        prop_assert_eq!(first, second);
        prop_assert!(once.grants.iter().all(|key| PermissionKey::ALL.contains(key)));
    }

    #[test]
    fn kept_keys_were_submitted_verbatim(
        principal in arb_principal(),
        requested in arb_raw_request(),
    ) {
        let admin = admin();
        let mut target = principal;

        let records = set_permissions(&mut target, &requested, &admin).unwrap();

        for key in &target.grants {
            prop_assert!(requested.contains(&key.to_string()), "{} was not submitted", key);
        }
        prop_assert_eq!(records.len(), target.grants.len());
    }

    #[test]
    fn grant_all_makes_reads_and_writes_match(principal in arb_principal(), ceiling in arb_level()) {
        prop_assume!(ceiling <= principal.clearance);
        let admin = admin();
        let mut principal = principal;

        grant_all_at_clearance(&mut principal, ceiling, &admin).unwrap();
        let expected: Vec<_> = ClassificationLevel::up_to(ceiling).collect();

        prop_assert_eq!(readable_levels(&principal), expected.clone());
        prop_assert_eq!(writable_levels(&principal), expected);
        prop_assert_eq!(&principal.grants, &full_grant_set(ceiling));
    }

    #[test]
    fn non_admin_cannot_replace_grants(
        principal in arb_principal(),
        requested in arb_raw_request(),
        clearance in arb_level(),
    ) {
        let acting = PrincipalBuilder::new("operator")
            .clearance(ClassificationLevel::TopSecret)
            .all_at_clearance()
            .build();
        let mut target = principal.clone();

        let replaced = set_permissions(&mut target, &requested, &acting);
        prop_assert!(matches!(replaced, Err(ClearanceError::Unauthorized { .. })), "expected Unauthorized, got {:?}", replaced);
        prop_assert_eq!(&target, &principal);

        let granted = grant_all_at_clearance(&mut target, clearance, &acting);
        prop_assert!(granted.is_err_and(|err| err.is_unauthorized()));
        prop_assert_eq!(&target, &principal);
    }
}
