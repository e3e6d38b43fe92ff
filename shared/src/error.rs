use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInterval(String),
    #[error("{0}")]
    PastBooking(String),
    #[error("{0}")]
    UnknownRoom(String),
    #[error("the room is already reserved for the requested interval")]
    ReservationConflict { conflicting: Uuid },
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    NotOwner(String),
    #[error("{0}")]
    AlreadyPast(String),
    #[error("reservation admission timed out, retry the request")]
    AdmissionTimeout,
    #[error("{0}")]
    ConfigError(String),
    #[error("{0}")]
    PolicyViolation(String),
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    UnauthenticatedError(String),
    #[error("{0}")]
    ForbiddenOperation(String),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("{0}")]
    ExternalServiceError(String),
}

impl AppError {
    /// Machine-readable rejection reason carried next to the
    /// human-readable message in every error body.
    pub fn code(&self) -> &'static str {
        use AppError::*;
        match self {
            InvalidInterval(_) => "INVALID_INTERVAL",
            PastBooking(_) => "PAST_BOOKING",
            UnknownRoom(_) => "UNKNOWN_ROOM",
            ReservationConflict { .. } => "CONFLICT",
            EntityNotFound(_) => "NOT_FOUND",
            NotOwner(_) => "NOT_OWNER",
            AlreadyPast(_) => "ALREADY_PAST",
            AdmissionTimeout => "TIMEOUT",
            ConfigError(_) => "CONFIG_ERROR",
            PolicyViolation(_) => "POLICY_VIOLATION",
            ValidationError(_) => "VALIDATION_ERROR",
            UnprocessableEntity(_) => "UNPROCESSABLE_ENTITY",
            UnauthenticatedError(_) => "UNAUTHENTICATED",
            ForbiddenOperation(_) => "FORBIDDEN",
            ConversionEntityError(_) => "CONVERSION_ERROR",
            ExternalServiceError(_) => "EXTERNAL_SERVICE_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        use AppError::*;
        match self {
            InvalidInterval(_)
            | PastBooking(_)
            | PolicyViolation(_)
            | ValidationError(_)
            | UnprocessableEntity(_) => StatusCode::BAD_REQUEST,
            UnknownRoom(_) | EntityNotFound(_) => StatusCode::NOT_FOUND,
            ReservationConflict { .. } | AlreadyPast(_) => StatusCode::CONFLICT,
            NotOwner(_) | ForbiddenOperation(_) => StatusCode::FORBIDDEN,
            UnauthenticatedError(_) => StatusCode::UNAUTHORIZED,
            AdmissionTimeout => StatusCode::SERVICE_UNAVAILABLE,
            ConfigError(_) | ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error.code = self.code(),
                error.message = %self,
                "request failed"
            );
        } else {
            tracing::warn!(
                error.code = self.code(),
                error.message = %self,
                "request rejected"
            );
        }

        let mut body = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "status": status.as_u16(),
            "code": self.code(),
            "message": self.to_string(),
        });
        if let AppError::ReservationConflict { conflicting } = &self {
            body["conflictingId"] = json!(conflicting);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_carries_the_conflicting_id() {
        let id = Uuid::new_v4();
        let err = AppError::ReservationConflict { conflicting: id };
        assert_eq!(err.code(), "CONFLICT");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn timeout_is_retryable() {
        assert_eq!(
            AppError::AdmissionTimeout.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(AppError::AdmissionTimeout.code(), "TIMEOUT");
    }
}
