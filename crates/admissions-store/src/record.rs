//! Admission record types.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// A persisted admission record, as returned by [`crate::list_admissions`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdmissionRecord {
    /// Row ID assigned by SQLite.
    pub id: i64,
    pub student_name: String,
    /// Date of birth. Stored as opaque text.
    pub dob: String,
    pub school_name: String,
    pub class_studying: Option<String>,
    pub syllabus: Option<String>,
    pub transfer_type: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    /// Filesystem path of the student's photo, not the image itself.
    pub photo_path: Option<String>,
    /// Whether an external system has ingested this record.
    pub synced: bool,
    /// Creation timestamp (`YYYY-MM-DD HH:MM:SS`, UTC). Not refreshed on sync.
    pub last_updated: String,
}

/// An unvalidated admission submission.
///
/// Every field is optional so that a body missing a required field can be
/// reported as a validation failure instead of a deserialization error.
/// Numbers and booleans are accepted and kept in their JSON text form;
/// arrays and objects are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdmissionDraft {
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub student_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub school_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub class_studying: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub syllabus: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub transfer_type: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub father_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub mother_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub photo_path: Option<String>,
}

/// A validated admission, ready for [`crate::insert_admission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmission {
    pub student_name: String,
    pub dob: String,
    pub school_name: String,
    pub class_studying: Option<String>,
    pub syllabus: Option<String>,
    pub transfer_type: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub photo_path: Option<String>,
}

impl AdmissionDraft {
    /// Checks that `student_name`, `dob` and `school_name` are present and
    /// non-empty. Values are kept exactly as submitted, without trimming.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRequiredFields`] naming every
    /// required field that is absent or empty.
    pub fn validate(self) -> Result<NewAdmission, ValidationError> {
        let mut missing = Vec::new();
        let student_name = required(self.student_name, "student_name", &mut missing);
        let dob = required(self.dob, "dob", &mut missing);
        let school_name = required(self.school_name, "school_name", &mut missing);

        match (student_name, dob, school_name) {
            (Some(student_name), Some(dob), Some(school_name)) => Ok(NewAdmission {
                student_name,
                dob,
                school_name,
                class_studying: self.class_studying,
                syllabus: self.syllabus,
                transfer_type: self.transfer_type,
                father_name: self.father_name,
                mother_name: self.mother_name,
                photo_path: self.photo_path,
            }),
            _ => Err(ValidationError::MissingRequiredFields(missing)),
        }
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            missing.push(field);
            None
        }
    }
}

/// Reads a JSON scalar as text. `null` and absent fields become `None`.
fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Array(_)) => Err(D::Error::custom("expected a scalar, found an array")),
        Some(Value::Object(_)) => Err(D::Error::custom("expected a scalar, found an object")),
    }
}
