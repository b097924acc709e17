use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use tether_domain::DomainError;

/// Transport-level error: domain failures plus the two request-shape
/// failures only the transport can detect.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    UnsupportedContentType,
    InvalidQueryParams,
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

/// Map each error kind to its fixed status code. Nothing is invented here:
/// unrecognized store faults surface as a generic server fault.
fn status(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Domain(DomainError::MalformedEntity(_)) => StatusCode::BAD_REQUEST,
        ApiError::Domain(DomainError::UnauthorizedAccess) => StatusCode::FORBIDDEN,
        ApiError::Domain(DomainError::NotFound) => StatusCode::NOT_FOUND,
        ApiError::Domain(DomainError::Conflict) => StatusCode::CONFLICT,
        ApiError::Domain(DomainError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        ApiError::UnsupportedContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ApiError::InvalidQueryParams => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = status(&self);

        let message = match &self {
            ApiError::Domain(err) => {
                if code == StatusCode::INTERNAL_SERVER_ERROR {
                    error!("internal error: {err}");
                    "internal server error".to_string()
                } else {
                    err.to_string()
                }
            }
            ApiError::UnsupportedContentType => "unsupported content type".to_string(),
            ApiError::InvalidQueryParams => "invalid query params".to_string(),
        };

        (code, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
