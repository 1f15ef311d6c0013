use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Domain model representing a stylist in the database
///
/// `specialties` holds the ids of the services the stylist can perform;
/// `appointment_count` is the lifetime completed-appointment counter
/// incremented by the appointment state machine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stylist {
    pub id: i32,
    pub name: String,
    pub specialties: Vec<i32>,
    pub is_active: bool,
    pub appointment_count: i32,
    pub max_daily_appointments: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Stylist {
    /// Whether this stylist can perform the given service
    pub fn can_perform(&self, service_id: i32) -> bool {
        self.specialties.contains(&service_id)
    }
}

/// Per-date exception to a stylist's weekly schedule
///
/// Absence of a row for a date means the weekly default applies.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScheduleOverride {
    pub id: i32,
    pub stylist_id: i32,
    pub date: NaiveDate,
    pub is_work_day: bool,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub max_appointments: Option<i32>,
    pub is_holiday: bool,
    pub is_special_day: bool,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Recurring weekly working hours, one row per (stylist, weekday)
/// Weekday is Sunday-based: 0 = Sunday .. 6 = Saturday
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WeeklyHours {
    pub id: i32,
    pub stylist_id: i32,
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_appointments: Option<i32>,
}

/// Request DTO for creating a stylist
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStylist {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    pub specialties: Vec<i32>,
    pub max_daily_appointments: Option<i32>,
}

/// Request DTO for upserting a per-date schedule override
///
/// Times arrive as `HH:MM` strings; unset fields fall back to the weekly
/// default at resolution time.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertScheduleOverride {
    pub date: NaiveDate,
    #[serde(default = "default_true")]
    pub is_work_day: bool,
    #[validate(custom = "crate::validation::validate_hhmm")]
    pub start_time: Option<String>,
    #[validate(custom = "crate::validation::validate_hhmm")]
    pub end_time: Option<String>,
    pub max_appointments: Option<i32>,
    #[serde(default)]
    pub is_holiday: bool,
    #[serde(default)]
    pub is_special_day: bool,
    pub note: Option<String>,
}

/// Request DTO for upserting weekly default hours for one weekday
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertWeeklyHours {
    #[validate(custom = "crate::validation::validate_weekday")]
    pub weekday: i16,
    #[validate(custom = "crate::validation::validate_hhmm")]
    pub start_time: String,
    #[validate(custom = "crate::validation::validate_hhmm")]
    pub end_time: String,
    pub max_appointments: Option<i32>,
}

fn default_true() -> bool {
    true
}
