use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorResponse;
use crate::storage::StorageError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    RevisionConflict(String),
    UpstreamError(String),
    InternalError(String),
    StorageError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", Some(msg)),
            ApiError::RevisionConflict(msg) => {
                (StatusCode::CONFLICT, "Revision Conflict", Some(msg))
            }
            ApiError::UpstreamError(msg) => (StatusCode::BAD_GATEWAY, "Upstream Error", Some(msg)),
            ApiError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                Some(msg),
            ),
            ApiError::StorageError(err) => {
                // Give typed storage failures their own status codes
                if let Some(storage_err) = err.downcast_ref::<StorageError>() {
                    match storage_err {
                        StorageError::RevisionConflict(_) => {
                            return ApiError::RevisionConflict(storage_err.to_string())
                                .into_response();
                        }
                        StorageError::Remote { .. } => {
                            return ApiError::UpstreamError(storage_err.to_string())
                                .into_response();
                        }
                        StorageError::Corrupted(_) => {
                            return ApiError::InternalError(storage_err.to_string())
                                .into_response();
                        }
                    }
                }

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage Error",
                    Some(err.to_string()),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

// Convenience conversion from anyhow::Error
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::StorageError(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
