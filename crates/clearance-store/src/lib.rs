//! Store and audit handlers for clearance
//!
//! Concrete implementations of the collaborator interfaces declared in
//! `clearance-core`:
//!
//! - [`MemoryPrincipalStore`]: shared in-memory state, one write lock per commit
//! - [`FilePrincipalStore`]: JSON snapshot, written to a temp file and renamed
//! - [`TracingAuditSink`]: audit events as structured `tracing` records

#![forbid(unsafe_code)]

pub mod audit;
pub mod file;
pub mod memory;
pub mod table;

pub use audit::TracingAuditSink;
pub use file::FilePrincipalStore;
pub use memory::MemoryPrincipalStore;
pub use table::{PrincipalTable, Snapshot, StoredPrincipal};
