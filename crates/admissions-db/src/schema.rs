//! Idempotent bootstrap of the `admissions` table.
//!
//! There is exactly one table and no versioning. The statement runs on every
//! startup and is a no-op once the table exists.

use rusqlite::Connection;
use thiserror::Error;

/// Name of the only table owned by the service.
pub const ADMISSIONS_TABLE: &str = "admissions";

const CREATE_ADMISSIONS: &str = "
    CREATE TABLE IF NOT EXISTS admissions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_name TEXT,
        dob TEXT,
        school_name TEXT,
        class_studying TEXT,
        syllabus TEXT,
        transfer_type TEXT,
        father_name TEXT,
        mother_name TEXT,
        photo_path TEXT,
        synced INTEGER DEFAULT 0,
        last_updated TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
";

/// Errors that can occur while ensuring the schema exists.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The `CREATE TABLE` statement failed.
    #[error("failed to create '{table}' table: {source}")]
    CreateTable {
        /// The table being created.
        table: &'static str,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },
}

/// Ensures the `admissions` table exists.
///
/// Safe to call any number of times; existing rows are never touched.
///
/// # Errors
///
/// Returns `SchemaError::CreateTable` if the statement fails. Callers treat
/// this as fatal since no storage operation can succeed without the table.
pub fn initialize_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(CREATE_ADMISSIONS)
        .map_err(|source| SchemaError::CreateTable {
            table: ADMISSIONS_TABLE,
            source,
        })?;

    tracing::info!(table = ADMISSIONS_TABLE, "admissions table is ready");
    Ok(())
}
