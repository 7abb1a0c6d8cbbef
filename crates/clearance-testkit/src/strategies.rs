//! Proptest strategies for levels, keys, and principals

use clearance_core::{
    ClassificationLevel, GrantSet, PermissionAction, PermissionKey, Principal, PrincipalId, Role,
};
use proptest::prelude::*;

/// Any classification level
pub fn arb_level() -> impl Strategy<Value = ClassificationLevel> {
    prop::sample::select(ClassificationLevel::ALL.to_vec())
}

/// Either action
pub fn arb_action() -> impl Strategy<Value = PermissionAction> {
    prop::sample::select(PermissionAction::ALL.to_vec())
}

/// Any key of the canonical vocabulary
pub fn arb_key() -> impl Strategy<Value = PermissionKey> {
    (arb_action(), arb_level()).prop_map(|(action, level)| PermissionKey::new(action, level))
}

/// Any subset of the vocabulary
pub fn arb_grant_set() -> impl Strategy<Value = GrantSet> {
    prop::collection::btree_set(arb_key(), 0..=PermissionKey::ALL.len())
}

/// Raw submitted keys: canonical ones mixed with out-of-range levels,
/// unknown actions, non-canonical digit forms such as `read_02`, and noise
pub fn arb_raw_key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => arb_key().prop_map(|key| key.to_string()),
        1 => (arb_action(), 4u8..20).prop_map(|(action, level)| format!("{action}_{level}")),
        1 => (prop::sample::select(vec!["delete", "admin", "READ"]), 0u8..4)
            .prop_map(|(action, level)| format!("{action}_{level}")),
        1 => (arb_action(), 0u8..4, 0u8..4).prop_map(|(action, level, shape)| match shape {
            0 => format!("{action}_0{level}"),
            1 => format!("{action}_+{level}"),
            2 => format!("{action}_ {level}"),
            _ => format!("{action}_{level} "),
        }),
        1 => "[a-z_0-9]{0,10}",
    ]
}

/// A list of raw keys as an admin form would submit them
pub fn arb_raw_request() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_raw_key(), 0..12)
}

/// A regular user with arbitrary clearance and grants, including stale
/// grants above the clearance
pub fn arb_principal() -> impl Strategy<Value = Principal> {
    (arb_level(), arb_grant_set(), "[a-z]{3,10}").prop_map(|(clearance, grants, username)| {
        Principal::new(PrincipalId::from_label(&username), username)
            .with_role(Role::User)
            .with_clearance(clearance)
            .with_grants(grants)
    })
}
