//! # Outcome → response mapping
//!
//! The single place where [`DomainError`] turns into a transport status and
//! JSON body. Expected domain outcomes keep their specific message; the two
//! unexpected kinds (`Storage`, `Internal`) are logged with detail here and
//! collapsed to a generic message for the caller.
//!
//! Malformed ids deliberately map to 404, not 400: the surface treats an
//! unparseable id the same as an id with no record behind it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use api::DomainError;

/// Wrapper giving [`DomainError`] an [`IntoResponse`] impl. Handlers return
/// `Result<_, ApiError>` and let `?` convert.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::NotFound | DomainError::InvalidId => StatusCode::NOT_FOUND,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::ArchivedImmutable
            | DomainError::AlreadyArchived
            | DomainError::NotArchived
            | DomainError::Validation(_)
            | DomainError::EmailTaken => StatusCode::BAD_REQUEST,
            DomainError::InvalidCredentials | DomainError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            DomainError::Storage(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self.0 {
            DomainError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                json!({ "message": "Server error" })
            }
            DomainError::Internal(detail) => {
                tracing::error!(error = %detail, "internal error");
                json!({ "message": "Server error" })
            }
            DomainError::Validation(errors) => {
                json!({ "message": self.0.to_string(), "errors": errors })
            }
            other => json!({ "message": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::StoreError;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(DomainError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::InvalidId), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(DomainError::ArchivedImmutable),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::AlreadyArchived),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(DomainError::NotArchived), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::EmailTaken), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(DomainError::Validation(Default::default())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(DomainError::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(DomainError::Storage(StoreError::Backend("down".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(DomainError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
