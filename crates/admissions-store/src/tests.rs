//! Unit tests for admission storage and validation.

use rusqlite::Connection;

use crate::error::{StoreError, ValidationError};
use crate::record::{AdmissionDraft, NewAdmission};
use crate::store::{insert_admission, list_admissions, mark_synced};

/// Creates an in-memory SQLite database with the admissions table.
fn test_db() -> Connection {
    let conn = Connection::open_in_memory().expect("should open in-memory db");
    admissions_db::initialize_schema(&conn).expect("schema init should succeed");
    conn
}

fn kumar() -> NewAdmission {
    NewAdmission {
        student_name: "A. Kumar".to_string(),
        dob: "2010-05-01".to_string(),
        school_name: "Green Valley".to_string(),
        class_studying: None,
        syllabus: None,
        transfer_type: None,
        father_name: None,
        mother_name: None,
        photo_path: None,
    }
}

// ── validation ──────────────────────────────────────────────────────

#[test]
fn validate_accepts_required_fields_only() {
    let draft = AdmissionDraft {
        student_name: Some("A. Kumar".to_string()),
        dob: Some("2010-05-01".to_string()),
        school_name: Some("Green Valley".to_string()),
        ..Default::default()
    };

    assert_eq!(draft.validate().expect("draft should be valid"), kumar());
}

#[test]
fn validate_reports_every_missing_field() {
    let draft = AdmissionDraft {
        dob: Some(String::new()),
        syllabus: Some("CBSE".to_string()),
        ..Default::default()
    };

    let err = draft.validate().expect_err("draft should be rejected");
    assert_eq!(
        err,
        ValidationError::MissingRequiredFields(vec!["student_name", "dob", "school_name"])
    );
    assert_eq!(
        err.to_string(),
        "missing required fields: student_name, dob, school_name"
    );
}

#[test]
fn validate_does_not_trim() {
    let draft = AdmissionDraft {
        student_name: Some("  ".to_string()),
        dob: Some(" 2010-05-01".to_string()),
        school_name: Some("Green Valley ".to_string()),
        ..Default::default()
    };

    let admission = draft.validate().expect("whitespace is not empty");
    assert_eq!(admission.student_name, "  ");
    assert_eq!(admission.dob, " 2010-05-01");
    assert_eq!(admission.school_name, "Green Valley ");
}

#[test]
fn draft_deserializes_with_absent_and_null_fields() {
    let draft: AdmissionDraft = serde_json::from_str(
        r#"{"student_name": "A. Kumar", "dob": null, "photo_path": "/photos/a.jpg"}"#,
    )
    .expect("draft should deserialize");

    assert_eq!(draft.student_name.as_deref(), Some("A. Kumar"));
    assert!(draft.dob.is_none());
    assert!(draft.school_name.is_none());
    assert_eq!(draft.photo_path.as_deref(), Some("/photos/a.jpg"));
}

#[test]
fn draft_keeps_numbers_and_booleans_as_text() {
    let draft: AdmissionDraft = serde_json::from_str(
        r#"{"student_name": "A", "dob": 20100501, "class_studying": 5, "syllabus": 2.5, "transfer_type": true}"#,
    )
    .expect("scalars should deserialize");

    assert_eq!(draft.dob.as_deref(), Some("20100501"));
    assert_eq!(draft.class_studying.as_deref(), Some("5"));
    assert_eq!(draft.syllabus.as_deref(), Some("2.5"));
    assert_eq!(draft.transfer_type.as_deref(), Some("true"));
}

#[test]
fn draft_rejects_nested_values() {
    for body in [
        r#"{"student_name": ["A"]}"#,
        r#"{"photo_path": {"dir": "/photos"}}"#,
    ] {
        assert!(
            serde_json::from_str::<AdmissionDraft>(body).is_err(),
            "body should be rejected: {body}"
        );
    }
}

// ── list_admissions ─────────────────────────────────────────────────

#[test]
fn list_on_empty_table_is_empty() {
    let conn = test_db();
    let admissions = list_admissions(&conn).expect("list should succeed");
    assert!(admissions.is_empty());
}

#[test]
fn list_without_table_is_a_database_error() {
    let conn = Connection::open_in_memory().expect("should open in-memory db");
    let err = list_admissions(&conn).expect_err("missing table should fail");
    assert!(matches!(err, StoreError::Database(_)));
}

#[test]
fn list_orders_by_id_ascending() {
    let conn = test_db();
    let mut ids = Vec::new();
    for name in ["C", "A", "B"] {
        let mut admission = kumar();
        admission.student_name = name.to_string();
        ids.push(insert_admission(&conn, &admission).expect("insert should succeed"));
    }

    let listed: Vec<i64> = list_admissions(&conn)
        .expect("list should succeed")
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(listed, ids);
}

// ── insert_admission ────────────────────────────────────────────────

#[test]
fn insert_then_list_round_trips_fields() {
    let conn = test_db();
    let admission = NewAdmission {
        class_studying: Some("5".to_string()),
        syllabus: Some("CBSE".to_string()),
        transfer_type: Some("".to_string()),
        father_name: Some("R. Kumar".to_string()),
        mother_name: Some("S. Kumar".to_string()),
        photo_path: Some("/photos/kumar.jpg".to_string()),
        ..kumar()
    };

    let id = insert_admission(&conn, &admission).expect("insert should succeed");
    assert!(id > 0, "returned row ID should be positive");

    let admissions = list_admissions(&conn).expect("list should succeed");
    assert_eq!(admissions.len(), 1);
    let stored = &admissions[0];
    assert_eq!(stored.id, id);
    assert_eq!(stored.student_name, admission.student_name);
    assert_eq!(stored.dob, admission.dob);
    assert_eq!(stored.school_name, admission.school_name);
    assert_eq!(stored.class_studying, admission.class_studying);
    assert_eq!(stored.syllabus, admission.syllabus);
    assert_eq!(stored.transfer_type.as_deref(), Some(""));
    assert_eq!(stored.father_name, admission.father_name);
    assert_eq!(stored.mother_name, admission.mother_name);
    assert_eq!(stored.photo_path, admission.photo_path);
    assert!(!stored.synced, "new admissions start unsynced");
    assert!(!stored.last_updated.is_empty());
}

#[test]
fn insert_stores_absent_optionals_as_null() {
    let conn = test_db();
    let id = insert_admission(&conn, &kumar()).expect("insert should succeed");

    let nulls: i64 = conn
        .query_row(
            "SELECT (class_studying IS NULL) + (syllabus IS NULL) + (transfer_type IS NULL)
                  + (father_name IS NULL) + (mother_name IS NULL) + (photo_path IS NULL)
             FROM admissions WHERE id = ?1",
            [id],
            |row| row.get(0),
        )
        .expect("should query row");
    assert_eq!(nulls, 6);
}

#[test]
fn insert_assigns_distinct_ids() {
    let conn = test_db();
    let first = insert_admission(&conn, &kumar()).expect("insert should succeed");
    let second = insert_admission(&conn, &kumar()).expect("insert should succeed");
    assert_ne!(first, second);
}

// ── mark_synced ─────────────────────────────────────────────────────

#[test]
fn mark_synced_flips_flag() {
    let conn = test_db();
    let id = insert_admission(&conn, &kumar()).expect("insert should succeed");
    let before = list_admissions(&conn).expect("list should succeed");

    assert_eq!(mark_synced(&conn, id).expect("sync should succeed"), 1);

    let after = list_admissions(&conn).expect("list should succeed");
    assert!(after[0].synced);
    assert_eq!(
        after[0].last_updated, before[0].last_updated,
        "last_updated is only set on insert"
    );
}

#[test]
fn mark_synced_is_idempotent() {
    let conn = test_db();
    let id = insert_admission(&conn, &kumar()).expect("insert should succeed");

    assert_eq!(mark_synced(&conn, id).expect("first sync"), 1);
    assert_eq!(mark_synced(&conn, id).expect("second sync"), 1);
    assert!(list_admissions(&conn).expect("list should succeed")[0].synced);
}

#[test]
fn mark_synced_unknown_id_affects_nothing() {
    let conn = test_db();
    let id = insert_admission(&conn, &kumar()).expect("insert should succeed");

    assert_eq!(mark_synced(&conn, id + 100).expect("sync should succeed"), 0);
    assert!(!list_admissions(&conn).expect("list should succeed")[0].synced);
}

#[test]
fn mark_synced_touches_only_target_row() {
    let conn = test_db();
    let first = insert_admission(&conn, &kumar()).expect("insert should succeed");
    let second = insert_admission(&conn, &kumar()).expect("insert should succeed");

    mark_synced(&conn, second).expect("sync should succeed");

    let admissions = list_admissions(&conn).expect("list should succeed");
    let synced: Vec<(i64, bool)> = admissions.iter().map(|a| (a.id, a.synced)).collect();
    assert_eq!(synced, vec![(first, false), (second, true)]);
}
