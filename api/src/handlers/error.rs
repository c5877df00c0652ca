//! Central conversion of domain errors into HTTP responses.
//!
//! Handlers return [`ApiResult`]; actix calls [`ResponseError::error_response`]
//! on the way out, so every failure leaves as the same envelope:
//!
//! ```json
//! { "statusCode": 401, "message": "Invalid refresh token", "success": false, "errors": [] }
//! ```

use actix_web::{
    error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError,
};
use vt_core::errors::{DomainError, ErrorKind};
use vt_shared::ApiErrorBody;

pub type ApiResult<T = HttpResponse> = Result<T, ApiError>;

/// Domain error travelling through actix
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl From<vt_core::errors::AuthError> for ApiError {
    fn from(err: vt_core::errors::AuthError) -> Self {
        ApiError(err.into())
    }
}

impl ApiError {
    pub fn body(&self) -> ApiErrorBody {
        ApiErrorBody::new(self.0.status_code(), self.0.public_message())
            .with_errors(self.0.details().to_vec())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        match self.0.kind() {
            ErrorKind::Internal => tracing::error!(error = %self.0, "Request failed"),
            kind => tracing::debug!(?kind, error = %self.0, "Request rejected"),
        }
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

/// Malformed or oversized JSON bodies become validation failures
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body is too large".to_string()
        }
        JsonPayloadError::ContentType => "Expected a JSON body".to_string(),
        other => format!("Invalid JSON body: {}", other),
    };
    ApiError(DomainError::validation(message)).into()
}

/// Default service for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiErrorBody::new(404, "Route not found"))
}
