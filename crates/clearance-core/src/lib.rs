//! Clearance Core - types and collaborator interfaces
//!
//! Foundation crate for classification-ceiling access control. It defines the
//! values every decision is made over and the interfaces of the
//! collaborators around the evaluator, with no policy and no storage.
//!
//! # Model
//!
//! ```text
//! authority(P, action, L) = L <= P.clearance  AND  (action, L) in P.grants
//! ```
//!
//! - [`ClassificationLevel`]: Unclassified < Confidential < Secret < TopSecret
//! - [`PermissionKey`]: one (action, level) pair of the canonical vocabulary
//! - [`Principal`]: clearance ceiling plus explicit grants
//! - [`PermissionGrant`]: a grant record attributed to the admin who made it
//!
//! # Interfaces
//!
//! - [`PrincipalStore`]: persisted principals, atomic grant-set replacement
//! - [`AuditSink`]: receives [`AuditEvent`]s from callers of the evaluator

#![forbid(unsafe_code)]

/// Classification levels
pub mod classification;

/// Collaborator interfaces
pub mod effects;

/// Unified error handling
pub mod errors;

/// Principal and resource identifiers
pub mod identifiers;

/// Permission vocabulary
pub mod permission;

/// Principals, roles, and grant records
pub mod principal;

/// Classified resources
pub mod resource;

pub use classification::ClassificationLevel;
pub use effects::{AuditEvent, AuditSink, PrincipalChange, PrincipalStore};
pub use errors::{ClearanceError, Result};
pub use identifiers::{PrincipalId, ResourceId};
pub use permission::{PermissionAction, PermissionKey};
pub use principal::{GrantSet, PermissionGrant, Principal, Role};
pub use resource::{Classified, Resource};
