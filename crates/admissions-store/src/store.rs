//! SQL access for the `admissions` table.

use rusqlite::{params, Connection, Row};

use crate::error::StoreError;
use crate::record::{AdmissionRecord, NewAdmission};

/// Returns every admission record ordered by `id` ascending.
///
/// The whole table is materialized; there is no pagination.
///
/// # Errors
///
/// Returns [`StoreError::Database`] if the query fails.
pub fn list_admissions(conn: &Connection) -> Result<Vec<AdmissionRecord>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT
            id, student_name, dob, school_name, class_studying, syllabus,
            transfer_type, father_name, mother_name, photo_path, synced, last_updated
        FROM admissions ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], map_row_to_admission)?;
    let mut admissions = Vec::new();
    for row in rows {
        admissions.push(row?);
    }
    Ok(admissions)
}

/// Inserts a new admission and returns its assigned ID.
///
/// `synced` starts at `0` and `last_updated` takes the column default.
///
/// # Errors
///
/// Returns [`StoreError::Database`] if the insert fails.
pub fn insert_admission(conn: &Connection, admission: &NewAdmission) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO admissions (
            student_name, dob, school_name, class_studying, syllabus,
            transfer_type, father_name, mother_name, photo_path
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            admission.student_name,
            admission.dob,
            admission.school_name,
            admission.class_studying,
            admission.syllabus,
            admission.transfer_type,
            admission.father_name,
            admission.mother_name,
            admission.photo_path,
        ],
    )?;

    let id = conn.last_insert_rowid();
    tracing::debug!(admission_id = id, "inserted admission");
    Ok(id)
}

/// Marks the admission with `id` as synced.
///
/// Returns the number of rows affected: `0` when no such admission exists,
/// `1` otherwise. Re-marking an already synced admission still returns `1`.
///
/// # Errors
///
/// Returns [`StoreError::Database`] if the update fails.
pub fn mark_synced(conn: &Connection, id: i64) -> Result<usize, StoreError> {
    let affected = conn.execute("UPDATE admissions SET synced = 1 WHERE id = ?1", [id])?;
    Ok(affected)
}

fn map_row_to_admission(row: &Row) -> rusqlite::Result<AdmissionRecord> {
    Ok(AdmissionRecord {
        id: row.get(0)?,
        student_name: row.get(1)?,
        dob: row.get(2)?,
        school_name: row.get(3)?,
        class_studying: row.get(4)?,
        syllabus: row.get(5)?,
        transfer_type: row.get(6)?,
        father_name: row.get(7)?,
        mother_name: row.get(8)?,
        photo_path: row.get(9)?,
        synced: row.get(10)?,
        last_updated: row.get(11)?,
    })
}
