//! Access control evaluator for classified resources
//!
//! Decides whether a principal may read or write at a classification level,
//! derives the level sets that scope listing and search, and replaces grant
//! sets on behalf of admins.
//!
//! # Policy
//!
//! ```text
//! can(P, action, L) = L <= P.clearance  AND  (action, L) in P.grants
//! ```
//!
//! Clearance is a ceiling: necessary, never sufficient. A principal cleared
//! for Top Secret with no grants can read nothing.
//!
//! # Layout
//!
//! - [`evaluator`]: pure predicates and level sets
//! - [`grants`]: grant-set replacement and filtering
//! - [`scope`]: level scopes for catalog/search collaborators
//! - [`admin`]: store-backed permission editor with audit emission
//! - [`audit`]: audited access checks for callers that gate visible actions
//! - [`bootstrap`]: first-run admin seeding and grant backfill

#![forbid(unsafe_code)]

pub mod admin;
pub mod audit;
pub mod bootstrap;
pub mod evaluator;
pub mod grants;
pub mod scope;

pub use admin::{GrantSelection, NewPrincipal, PermissionAdministrator, PrincipalUpdate};
pub use audit::{audited_check, audited_read, audited_write};
pub use bootstrap::{backfill_missing_grants, bootstrap_admin};
pub use evaluator::{
    can_moderate, can_read, can_write, decide, effective_levels, highest_readable_level,
    is_admin, is_permitted, readable_levels, require_admin, writable_levels, AccessDecision,
};
pub use grants::{
    canonical_grants, filter_grants_at_or_below, full_grant_set, grant_all_at_clearance,
    grant_permission, grant_records, held_keys, revoke_all, revoke_permission, set_permissions,
    RequestedGrant,
};
pub use scope::AccessScope;

pub use clearance_core::{ClearanceError, Result};
