//! API handlers for the admissions routes.

use crate::AppState;
use admissions_store::{AdmissionDraft, AdmissionRecord, StoreError};
use axum::{
    body::Bytes,
    extract::{Extension, Json, Path},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";
const INVALID_REQUEST_BODY: &str = "Invalid request body";
const ADMISSION_NOT_FOUND: &str = "Admission not found";
const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
const FAILED_TO_ADD_ADMISSION: &str = "Failed to add admission";

/// Response body for a successful admission submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAdmissionResponse {
    pub message: String,
    /// The ID assigned to the new admission.
    pub id: i64,
}

/// Response body carrying only a status message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// API error type mapping to HTTP status codes.
///
/// Messages are sent to the client verbatim, so internal errors must carry a
/// generic message; the underlying cause is logged where it occurs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Failure to complete a storage operation on a pooled connection.
#[derive(Debug, Error)]
pub enum StorageFault {
    #[error("db connection failed: {0}")]
    Pool(#[from] r2d2::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Runs `op` against a pooled connection on the blocking thread pool.
async fn with_connection<T, F>(state: Arc<AppState>, op: F) -> Result<T, StorageFault>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || -> Result<T, StorageFault> {
        let conn = state.pool.get()?;
        Ok(op(&*conn)?)
    })
    .await?
}

/// Logs `fault` and converts it to a 500 carrying only `public_message`.
fn storage_failure(
    operation: &'static str,
    public_message: &str,
    fault: StorageFault,
) -> ApiError {
    tracing::error!(operation, error = %fault, "admissions storage operation failed");
    ApiError::InternalServerError(public_message.to_string())
}

/// Handler for `GET /admissions`.
pub async fn list_admissions_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<AdmissionRecord>>, ApiError> {
    let admissions = with_connection(state, admissions_store::list_admissions)
        .await
        .map_err(|e| storage_failure("list_admissions", INTERNAL_SERVER_ERROR, e))?;

    Ok(Json(admissions))
}

/// Whether the request declares a JSON body (`application/json` or any
/// `+json` media type).
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Decodes a submission body.
///
/// A body that is empty, not declared as JSON, or a JSON array carries no
/// named fields, so it is read as an empty draft and fails required-field
/// validation rather than parsing.
fn parse_draft(headers: &HeaderMap, body: &[u8]) -> Result<AdmissionDraft, ApiError> {
    if !has_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AdmissionDraft::default());
    }

    let invalid = |e: serde_json::Error| {
        tracing::debug!(error = %e, "rejected admission body");
        ApiError::BadRequest(INVALID_REQUEST_BODY.to_string())
    };

    match serde_json::from_slice::<Value>(body).map_err(invalid)? {
        object @ Value::Object(_) => serde_json::from_value(object).map_err(invalid),
        Value::Array(_) => Ok(AdmissionDraft::default()),
        _ => Err(ApiError::BadRequest(INVALID_REQUEST_BODY.to_string())),
    }
}

/// Handler for `POST /admissions`.
///
/// Rejects the submission with `400` before touching the database when any
/// of `student_name`, `dob`, `school_name` is absent or empty.
pub async fn create_admission_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateAdmissionResponse>), ApiError> {
    let draft = parse_draft(&headers, &body)?;

    let admission = draft.validate().map_err(|e| {
        tracing::debug!(error = %e, "admission failed validation");
        ApiError::BadRequest(MISSING_REQUIRED_FIELDS.to_string())
    })?;

    let id = with_connection(state, move |conn| {
        admissions_store::insert_admission(conn, &admission)
    })
    .await
    .map_err(|e| storage_failure("insert_admission", FAILED_TO_ADD_ADMISSION, e))?;

    tracing::info!(admission_id = id, "admission added");

    Ok((
        StatusCode::CREATED,
        Json(CreateAdmissionResponse {
            message: "Admission added successfully".to_string(),
            id,
        }),
    ))
}

/// Handler for `PUT /admissions/{id}/sync`.
///
/// An `id` that is not an integer cannot name any row, so it is reported as
/// not found rather than as a malformed request.
pub async fn mark_synced_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::NotFound(ADMISSION_NOT_FOUND.to_string()))?;

    let affected = with_connection(state, move |conn| admissions_store::mark_synced(conn, id))
        .await
        .map_err(|e| storage_failure("mark_synced", INTERNAL_SERVER_ERROR, e))?;

    if affected == 0 {
        return Err(ApiError::NotFound(ADMISSION_NOT_FOUND.to_string()));
    }

    tracing::info!(admission_id = id, "admission marked as synced");

    Ok(Json(MessageResponse {
        message: "Admission marked as synced".to_string(),
    }))
}
