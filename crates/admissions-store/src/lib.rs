//! Admission record model and persistence for the admissions service.
//!
//! Implements the three storage operations the HTTP layer exposes: listing
//! every record, inserting a new one, and flipping its `synced` flag. All
//! functions take a borrowed [`rusqlite::Connection`] so callers decide where
//! the connection comes from (a pooled connection in the server, an
//! in-memory database in tests).
//!
//! Records are never deleted and only the `synced` column is ever updated,
//! and only from `0` to `1`.

mod error;
mod record;
mod store;

pub use error::{StoreError, ValidationError};
pub use record::{AdmissionDraft, AdmissionRecord, NewAdmission};
pub use store::{insert_admission, list_admissions, mark_synced};

#[cfg(test)]
mod tests;
