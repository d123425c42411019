//! Audit trail of create, update and delete operations
//!
//! Every mutation made through the services is appended to `audit.log` as a
//! JSON line with the entity's before and after state.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
