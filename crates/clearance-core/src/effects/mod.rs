//! Collaborator interfaces (no implementations)

pub mod audit;
pub mod store;

pub use audit::{AuditEvent, AuditSink};
pub use store::{ensure_owned_by, PrincipalChange, PrincipalStore};
