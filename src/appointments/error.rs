use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::scheduling::SchedulingError;

/// Error types for booking operations
#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Appointment not found")]
    NotFound,

    #[error("Service not found: {0}")]
    ServiceNotFound(i32),

    #[error("Stylist not found: {0}")]
    StylistNotFound(i32),

    #[error("Slot unavailable: {0}")]
    Unavailable(String),

    #[error("Booking conflict: {0}")]
    Conflict(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for AppointmentError {
    fn from(err: sqlx::Error) -> Self {
        AppointmentError::DatabaseError(err.to_string())
    }
}

impl From<SchedulingError> for AppointmentError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::StylistNotFound(id) => AppointmentError::StylistNotFound(id),
            SchedulingError::InvalidScheduleData(msg) => AppointmentError::ValidationError(msg),
            SchedulingError::DatabaseError(e) => AppointmentError::DatabaseError(e.to_string()),
        }
    }
}

impl IntoResponse for AppointmentError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppointmentError::DatabaseError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppointmentError::NotFound => {
                (StatusCode::NOT_FOUND, "Appointment not found".to_string())
            }
            AppointmentError::ServiceNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Service with id {} not found", id),
            ),
            AppointmentError::StylistNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Stylist with id {} not found", id),
            ),
            AppointmentError::Unavailable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppointmentError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppointmentError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, msg),
            AppointmentError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppointmentError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduling_error_mapping() {
        let err: AppointmentError = SchedulingError::StylistNotFound(7).into();
        assert!(matches!(err, AppointmentError::StylistNotFound(7)));

        let err: AppointmentError =
            SchedulingError::InvalidScheduleData("bad hours".to_string()).into();
        assert!(matches!(err, AppointmentError::ValidationError(_)));
    }
}
