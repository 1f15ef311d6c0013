// Error types for the scheduling subsystem

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors raised while resolving calendars and checking availability
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// A stored or supplied time string is not valid 24-hour HH:MM
    #[error("Invalid schedule data: {0}")]
    InvalidScheduleData(String),

    /// Referenced stylist does not exist
    #[error("Stylist not found: {0}")]
    StylistNotFound(i32),

    /// Database operation errors
    /// Automatically converted from sqlx::Error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Result type alias for scheduling operations
pub type SchedulingResult<T> = Result<T, SchedulingError>;

impl IntoResponse for SchedulingError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            SchedulingError::InvalidScheduleData(_) => {
                (StatusCode::BAD_REQUEST, "Invalid schedule data")
            }
            SchedulingError::StylistNotFound(_) => (StatusCode::NOT_FOUND, "Stylist not found"),
            SchedulingError::DatabaseError(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "details": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SchedulingError::InvalidScheduleData("25:99".to_string());
        assert_eq!(error.to_string(), "Invalid schedule data: 25:99");

        let error = SchedulingError::StylistNotFound(7);
        assert_eq!(error.to_string(), "Stylist not found: 7");
    }

    #[test]
    fn test_error_from_sqlx() {
        let err: SchedulingError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, SchedulingError::DatabaseError(_)));
    }
}
