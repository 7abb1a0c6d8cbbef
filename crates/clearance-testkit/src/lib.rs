//! Test utilities for clearance crates
//!
//! Fixtures, builders, proptest strategies, and a recording audit sink.
//! Only depends on `clearance-core`, so any crate can take it as a
//! dev-dependency without cycles.

pub mod audit;
pub mod builders;
pub mod strategies;

pub use audit::RecordingAuditSink;
pub use builders::{admin, cleared_user, user, PrincipalBuilder};
pub use strategies::{
    arb_action, arb_grant_set, arb_key, arb_level, arb_principal, arb_raw_key, arb_raw_request,
};
