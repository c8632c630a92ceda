//! Error types for admission storage.

/// Errors that can occur while reading or writing admission records.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A SQLite statement failed.
    #[error("admissions database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// A submitted admission is missing caller-supplied data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more of `student_name`, `dob`, `school_name` is absent or empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),
}
