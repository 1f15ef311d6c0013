use chrono::NaiveTime;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::ApiError;
use crate::stylists::{CreateStylist, ScheduleOverride, Stylist, WeeklyHours};

const STYLIST_COLUMNS: &str = "id, name, specialties, is_active, appointment_count, \
                               max_daily_appointments, created_at, updated_at";

/// Repository for stylist read/write operations
#[derive(Clone)]
pub struct StylistsRepository {
    pool: PgPool,
}

impl StylistsRepository {
    /// Create a new StylistsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a stylist by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Stylist>, sqlx::Error> {
        sqlx::query_as::<_, Stylist>(&format!(
            "SELECT {STYLIST_COLUMNS} FROM stylists WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// List all stylists, optionally restricted to active ones
    pub async fn find_all(&self, active_only: bool) -> Result<Vec<Stylist>, sqlx::Error> {
        sqlx::query_as::<_, Stylist>(&format!(
            "SELECT {STYLIST_COLUMNS} FROM stylists \
             WHERE ($1 = FALSE OR is_active) ORDER BY id"
        ))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
    }

    /// Active stylists whose specialties include the given service
    pub async fn find_active_capable(&self, service_id: i32) -> Result<Vec<Stylist>, sqlx::Error> {
        sqlx::query_as::<_, Stylist>(&format!(
            "SELECT {STYLIST_COLUMNS} FROM stylists \
             WHERE is_active AND $1 = ANY(specialties) ORDER BY id"
        ))
        .bind(service_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Create a new stylist
    pub async fn create(&self, request: &CreateStylist) -> Result<Stylist, ApiError> {
        let stylist = sqlx::query_as::<_, Stylist>(&format!(
            "INSERT INTO stylists (name, specialties, max_daily_appointments) \
             VALUES ($1, $2, COALESCE($3, 10)) \
             RETURNING {STYLIST_COLUMNS}"
        ))
        .bind(&request.name)
        .bind(&request.specialties)
        .bind(request.max_daily_appointments)
        .fetch_one(&self.pool)
        .await?;

        Ok(stylist)
    }

    /// Increment the lifetime completed-appointment counter.
    ///
    /// Runs inside the status-transition transaction so the counter and
    /// the status change commit together.
    pub async fn increment_appointment_count(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        stylist_id: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE stylists \
             SET appointment_count = appointment_count + 1, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(stylist_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

/// Repository for schedule-management operations
#[derive(Clone)]
pub struct SchedulesRepository {
    pool: PgPool,
}

impl SchedulesRepository {
    /// Create a new SchedulesRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace the per-date override for (stylist, date)
    pub async fn upsert_override(
        &self,
        stylist_id: i32,
        date: chrono::NaiveDate,
        is_work_day: bool,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
        max_appointments: Option<i32>,
        is_holiday: bool,
        is_special_day: bool,
        note: Option<&str>,
    ) -> Result<ScheduleOverride, sqlx::Error> {
        sqlx::query_as::<_, ScheduleOverride>(
            r#"
            INSERT INTO stylist_schedule_overrides
                (stylist_id, date, is_work_day, start_time, end_time,
                 max_appointments, is_holiday, is_special_day, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (stylist_id, date)
            DO UPDATE SET
                is_work_day = EXCLUDED.is_work_day,
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                max_appointments = EXCLUDED.max_appointments,
                is_holiday = EXCLUDED.is_holiday,
                is_special_day = EXCLUDED.is_special_day,
                note = EXCLUDED.note,
                updated_at = NOW()
            RETURNING id, stylist_id, date, is_work_day, start_time, end_time,
                      max_appointments, is_holiday, is_special_day, note,
                      created_at, updated_at
            "#,
        )
        .bind(stylist_id)
        .bind(date)
        .bind(is_work_day)
        .bind(start_time)
        .bind(end_time)
        .bind(max_appointments)
        .bind(is_holiday)
        .bind(is_special_day)
        .bind(note)
        .fetch_one(&self.pool)
        .await
    }

    /// List a stylist's overrides within an inclusive date range
    pub async fn list_overrides(
        &self,
        stylist_id: i32,
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    ) -> Result<Vec<ScheduleOverride>, sqlx::Error> {
        sqlx::query_as::<_, ScheduleOverride>(
            r#"
            SELECT id, stylist_id, date, is_work_day, start_time, end_time,
                   max_appointments, is_holiday, is_special_day, note,
                   created_at, updated_at
            FROM stylist_schedule_overrides
            WHERE stylist_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date
            "#,
        )
        .bind(stylist_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
    }

    /// Insert or replace the weekly default hours for (stylist, weekday)
    pub async fn upsert_weekly_hours(
        &self,
        stylist_id: i32,
        weekday: i16,
        start_time: NaiveTime,
        end_time: NaiveTime,
        max_appointments: Option<i32>,
    ) -> Result<WeeklyHours, sqlx::Error> {
        sqlx::query_as::<_, WeeklyHours>(
            r#"
            INSERT INTO stylist_weekly_hours
                (stylist_id, weekday, start_time, end_time, max_appointments)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (stylist_id, weekday)
            DO UPDATE SET
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                max_appointments = EXCLUDED.max_appointments
            RETURNING id, stylist_id, weekday, start_time, end_time, max_appointments
            "#,
        )
        .bind(stylist_id)
        .bind(weekday)
        .bind(start_time)
        .bind(end_time)
        .bind(max_appointments)
        .fetch_one(&self.pool)
        .await
    }

    /// List a stylist's weekly default hours
    pub async fn list_weekly_hours(&self, stylist_id: i32) -> Result<Vec<WeeklyHours>, sqlx::Error> {
        sqlx::query_as::<_, WeeklyHours>(
            r#"
            SELECT id, stylist_id, weekday, start_time, end_time, max_appointments
            FROM stylist_weekly_hours
            WHERE stylist_id = $1
            ORDER BY weekday
            "#,
        )
        .bind(stylist_id)
        .fetch_all(&self.pool)
        .await
    }
}
