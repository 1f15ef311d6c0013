use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Appointment status enum representing the booking lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Convert status to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in-progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Parse status from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "in-progress" => Ok(AppointmentStatus::InProgress),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(format!("Invalid appointment status: {}", s)),
        }
    }

    /// Whether no further transitions leave this state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Pending
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Change-log entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Create,
    Update,
    StatusChange,
    Cancel,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChangeType::Create => "create",
            ChangeType::Update => "update",
            ChangeType::StatusChange => "status_change",
            ChangeType::Cancel => "cancel",
        };
        write!(f, "{}", s)
    }
}

/// Domain model representing an appointment in the database
///
/// Customer, service and stylist names are creation-time snapshots kept
/// for audit fidelity; a later rename of the referenced entity does not
/// rewrite them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: i32,
    pub appointment_code: String,
    pub customer_id: Option<i32>,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_id: i32,
    pub service_name: String,
    pub stylist_id: Option<i32>,
    pub stylist_name: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only audit row recording one mutation of an appointment
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AppointmentChangeLog {
    pub id: i32,
    pub appointment_id: i32,
    pub changed_by: String,
    pub old_values: serde_json::Value,
    pub new_values: serde_json::Value,
    pub change_type: ChangeType,
    pub created_at: DateTime<Utc>,
}

/// Domain model representing a customer
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating an appointment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    #[validate(length(min = 1, max = 100, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "Customer phone is required"))]
    pub customer_phone: String,
    pub service_id: i32,
    pub stylist_id: Option<i32>,
    pub date: NaiveDate,
    #[validate(custom = "crate::validation::validate_hhmm")]
    pub start_time: String,
    #[validate(custom = "crate::validation::validate_hhmm")]
    pub end_time: String,
    pub notes: Option<String>,
    /// Who is making the booking; defaults to "customer"
    pub actor: Option<String>,
}

/// Request DTO for updating an appointment (partial)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAppointmentRequest {
    #[validate(length(min = 1, max = 100, message = "Customer name must not be empty"))]
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub service_id: Option<i32>,
    pub stylist_id: Option<i32>,
    pub date: Option<NaiveDate>,
    #[validate(custom = "crate::validation::validate_hhmm")]
    pub start_time: Option<String>,
    #[validate(custom = "crate::validation::validate_hhmm")]
    pub end_time: Option<String>,
    pub notes: Option<String>,
    pub actor: Option<String>,
}

/// Request DTO for updating appointment status
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
    pub actor: Option<String>,
}

/// Request DTO for cancelling an appointment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelAppointmentRequest {
    /// Customer self-service cancellations must present the code
    pub appointment_code: Option<String>,
    pub actor: Option<String>,
}

/// Request DTO for customer self-service lookup
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyAppointmentRequest {
    #[validate(length(min = 1, message = "Appointment code is required"))]
    pub appointment_code: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
}

/// Query parameters for slot listing
#[derive(Debug, Clone, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub service_id: i32,
    pub stylist_id: Option<i32>,
}

/// One candidate slot in a listing response
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SlotResponse {
    pub id: i32,
    pub date: NaiveDate,
    /// HH:MM
    pub start_time: String,
    /// HH:MM
    pub end_time: String,
    pub is_available: bool,
    pub stylist_id: i32,
}

/// Query parameters for the appointment dashboard listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentListQuery {
    pub date: Option<NaiveDate>,
    pub stylist_id: Option<i32>,
    pub status: Option<AppointmentStatus>,
}
