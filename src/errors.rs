//! Error types for superheroes operations.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sqlx::error::{DatabaseError, ErrorKind};

use crate::ValidationError;

/// Errors that can occur during data store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataStoreError {
    /// The requested row was not found.
    NotFound,
    /// A row with the same identifier already exists.
    AlreadyExists,
    /// A field failed validation before any write was attempted.
    InvalidValue(ValidationError),
    /// The store rejected a write because of a foreign-key, not-null or check constraint.
    IntegrityViolation(String),
    /// Another connection held the lock this operation needed.
    Conflict(String),
    /// An internal storage system error occurred.
    Internal(String),
}

impl std::fmt::Display for DataStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "Row not found in data store"),
            Self::AlreadyExists => write!(f, "Row already exists in data store"),
            Self::InvalidValue(err) => write!(f, "Invalid value: {}", err),
            Self::IntegrityViolation(msg) => write!(f, "Integrity violation: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl From<sqlx::Error> for DataStoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => DataStoreError::NotFound,
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => DataStoreError::AlreadyExists,
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    DataStoreError::IntegrityViolation(db_err.message().to_string())
                }
                _ if is_lock_contention(&*db_err) => {
                    DataStoreError::Conflict(db_err.message().to_string())
                }
                _ => DataStoreError::Internal(db_err.to_string()),
            },
            _ => DataStoreError::Internal(e.to_string()),
        }
    }
}

/// SQLITE_BUSY and SQLITE_LOCKED, including their extended codes.
fn is_lock_contention(db_err: &dyn DatabaseError) -> bool {
    db_err
        .code()
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, 5 | 6))
}

impl From<ValidationError> for DataStoreError {
    fn from(e: ValidationError) -> Self {
        DataStoreError::InvalidValue(e)
    }
}

impl std::error::Error for DataStoreError {}

/////////////////////////////////////////////// ApiError ///////////////////////////////////////////////

/// Message sent to clients when the store rejects a write that passed validation.
pub const INTEGRITY_VIOLATION_MESSAGE: &str = "validation errors";

/// Message sent to clients in place of the details of a server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Errors returned by HTTP handlers.
///
/// | Variant | Status | Body |
/// |---|---|---|
/// | `NotFound("Hero")` | 404 | `{"error": "Hero not found"}` |
/// | `InvalidValue(..)` | 400 | `{"errors": [...]}` |
/// | `IntegrityViolation` | 400 | `{"errors": ["validation errors"]}` |
/// | `Internal(..)` | 500 | `{"error": "internal error"}` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No row of the named kind matches the requested id.
    NotFound(&'static str),
    /// The request carried values that failed validation.
    InvalidValue(Vec<String>),
    /// The store refused the write or could not take its lock; the transaction has been
    /// rolled back.
    IntegrityViolation,
    /// Anything else.  The detail is logged, never sent.
    Internal(String),
}

impl ApiError {
    /// Maps a data store error raised while working on rows of kind `entity`.
    pub fn from_data_store(entity: &'static str, err: DataStoreError) -> Self {
        match err {
            DataStoreError::NotFound => ApiError::NotFound(entity),
            DataStoreError::InvalidValue(err) => ApiError::from(err),
            DataStoreError::IntegrityViolation(msg) => {
                tracing::warn!(entity, "integrity violation: {}", msg);
                ApiError::IntegrityViolation
            }
            DataStoreError::Conflict(msg) => {
                tracing::warn!(entity, "lock contention: {}", msg);
                ApiError::IntegrityViolation
            }
            DataStoreError::Internal(msg) => ApiError::Internal(msg),
            DataStoreError::AlreadyExists => ApiError::Internal(err.to_string()),
        }
    }

    /// The HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidValue(_) | ApiError::IntegrityViolation => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(entity) => write!(f, "{} not found", entity),
            ApiError::InvalidValue(messages) => write!(f, "{}", messages.join("; ")),
            ApiError::IntegrityViolation => write!(f, "{}", INTEGRITY_VIOLATION_MESSAGE),
            ApiError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::InvalidValue(e.into_messages())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match DataStoreError::from(e) {
            DataStoreError::Conflict(msg) => {
                tracing::warn!("lock contention: {}", msg);
                ApiError::IntegrityViolation
            }
            err => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::NotFound(_) => json!({ "error": self.to_string() }),
            ApiError::InvalidValue(messages) => json!({ "errors": messages }),
            ApiError::IntegrityViolation => json!({ "errors": [INTEGRITY_VIOLATION_MESSAGE] }),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                json!({ "error": INTERNAL_ERROR_MESSAGE })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        let err = ApiError::from_data_store("Power", DataStoreError::NotFound);
        assert_eq!(err, ApiError::NotFound("Power"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Power not found");
    }

    #[test]
    fn validation_is_a_bad_request() {
        let err = ApiError::from_data_store(
            "Power",
            DataStoreError::InvalidValue(ValidationError::new("description must be present")),
        );
        assert_eq!(
            err,
            ApiError::InvalidValue(vec!["description must be present".to_string()])
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn integrity_violation_hides_store_details() {
        let err = ApiError::from_data_store(
            "HeroPower",
            DataStoreError::IntegrityViolation("FOREIGN KEY constraint failed".to_string()),
        );
        assert_eq!(err, ApiError::IntegrityViolation);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "validation errors");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert_eq!(
            DataStoreError::from(sqlx::Error::RowNotFound),
            DataStoreError::NotFound
        );
    }

    #[test]
    fn other_errors_are_internal() {
        let err = ApiError::from_data_store("Hero", DataStoreError::Internal("boom".to_string()));
        assert_eq!(err, ApiError::Internal("boom".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn conflict_is_a_bad_request() {
        let err = ApiError::from_data_store(
            "HeroPower",
            DataStoreError::Conflict("database is locked".to_string()),
        );
        assert_eq!(err, ApiError::IntegrityViolation);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn internal_body_omits_details() {
        let (status, body) =
            body_of(ApiError::Internal("(code: 5) database is locked".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "internal error"}));
    }

    #[tokio::test]
    async fn response_bodies() {
        let (status, body) = body_of(ApiError::NotFound("Hero")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Hero not found"}));

        let (status, body) = body_of(ApiError::IntegrityViolation).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"errors": ["validation errors"]}));
    }
}
