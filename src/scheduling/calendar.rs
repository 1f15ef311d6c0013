// Calendar / working-hours resolver
//
// Answers "is this stylist working on this date, and when?" by layering
// per-date overrides (holidays, special days) over the stylist's weekly
// default schedule. Resolution itself is a pure function over fetched
// rows; the resolver wraps it with the repository lookups.

use chrono::{Datelike, NaiveDate, NaiveTime};
use sqlx::PgPool;

use crate::scheduling::error::{SchedulingError, SchedulingResult};
use crate::stylists::{ScheduleOverride, WeeklyHours};

/// The resolved working calendar for one (stylist, date) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDay {
    pub is_working_day: bool,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub max_appointments: Option<i32>,
}

impl ResolvedDay {
    /// A day the stylist is not working at all
    pub fn closed() -> Self {
        Self {
            is_working_day: false,
            start_time: None,
            end_time: None,
            max_appointments: None,
        }
    }

    /// Whether `[start, end)` lies entirely within the working hours
    pub fn contains_interval(&self, start: NaiveTime, end: NaiveTime) -> bool {
        match (self.start_time, self.end_time) {
            (Some(work_start), Some(work_end)) => {
                self.is_working_day && start >= work_start && end <= work_end
            }
            _ => false,
        }
    }
}

/// Parse a 24-hour `HH:MM` string
///
/// Time strings cross the API boundary in this format; anything else
/// signals `InvalidScheduleData`.
pub fn parse_hhmm(value: &str) -> SchedulingResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| SchedulingError::InvalidScheduleData(value.to_string()))
}

/// Resolve a stylist's working day from the stored schedule rows.
///
/// Resolution order:
/// 1. An explicit per-date override wins. `is_work_day = false` means
///    closed regardless of anything else; unset fields fall back to the
///    weekly default, then the stylist default capacity.
/// 2. With no override, the weekly default for that weekday applies.
/// 3. With neither, the stylist is not working that date.
pub fn resolve_day(
    override_row: Option<&ScheduleOverride>,
    weekly_row: Option<&WeeklyHours>,
    stylist_default_max: i32,
) -> ResolvedDay {
    if let Some(ov) = override_row {
        if !ov.is_work_day {
            return ResolvedDay::closed();
        }

        let start = ov.start_time.or(weekly_row.map(|w| w.start_time));
        let end = ov.end_time.or(weekly_row.map(|w| w.end_time));
        let max = ov
            .max_appointments
            .or(weekly_row.and_then(|w| w.max_appointments))
            .unwrap_or(stylist_default_max);

        // An override marked working but with no resolvable hours is
        // treated as closed rather than guessed at.
        return match (start, end) {
            (Some(start), Some(end)) if start < end => ResolvedDay {
                is_working_day: true,
                start_time: Some(start),
                end_time: Some(end),
                max_appointments: Some(max),
            },
            _ => ResolvedDay::closed(),
        };
    }

    match weekly_row {
        Some(weekly) => ResolvedDay {
            is_working_day: true,
            start_time: Some(weekly.start_time),
            end_time: Some(weekly.end_time),
            max_appointments: Some(weekly.max_appointments.unwrap_or(stylist_default_max)),
        },
        // No override and no weekly default: closed
        None => ResolvedDay::closed(),
    }
}

/// Resolver backed by the schedule tables
#[derive(Clone)]
pub struct CalendarResolver {
    pool: PgPool,
}

impl CalendarResolver {
    /// Create a new CalendarResolver
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve working hours and capacity for a stylist on a date
    ///
    /// Fails with `StylistNotFound` if the stylist does not exist;
    /// otherwise always produces a `ResolvedDay` (possibly closed).
    pub async fn resolve(
        &self,
        stylist_id: i32,
        date: NaiveDate,
    ) -> SchedulingResult<ResolvedDay> {
        let default_max: Option<i32> =
            sqlx::query_scalar("SELECT max_daily_appointments FROM stylists WHERE id = $1")
                .bind(stylist_id)
                .fetch_optional(&self.pool)
                .await?;

        let default_max = default_max.ok_or(SchedulingError::StylistNotFound(stylist_id))?;

        let override_row = sqlx::query_as::<_, ScheduleOverride>(
            r#"
            SELECT id, stylist_id, date, is_work_day, start_time, end_time,
                   max_appointments, is_holiday, is_special_day, note,
                   created_at, updated_at
            FROM stylist_schedule_overrides
            WHERE stylist_id = $1 AND date = $2
            "#,
        )
        .bind(stylist_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        let weekday = date.weekday().num_days_from_sunday() as i16;
        let weekly_row = sqlx::query_as::<_, WeeklyHours>(
            r#"
            SELECT id, stylist_id, weekday, start_time, end_time, max_appointments
            FROM stylist_weekly_hours
            WHERE stylist_id = $1 AND weekday = $2
            "#,
        )
        .bind(stylist_id)
        .bind(weekday)
        .fetch_optional(&self.pool)
        .await?;

        Ok(resolve_day(
            override_row.as_ref(),
            weekly_row.as_ref(),
            default_max,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn weekly(start: &str, end: &str, max: Option<i32>) -> WeeklyHours {
        WeeklyHours {
            id: 1,
            stylist_id: 1,
            weekday: 1,
            start_time: t(start),
            end_time: t(end),
            max_appointments: max,
        }
    }

    fn override_row(
        is_work_day: bool,
        start: Option<&str>,
        end: Option<&str>,
        max: Option<i32>,
    ) -> ScheduleOverride {
        ScheduleOverride {
            id: 1,
            stylist_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            is_work_day,
            start_time: start.map(t),
            end_time: end.map(t),
            max_appointments: max,
            is_holiday: false,
            is_special_day: false,
            note: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_hhmm_valid() {
        assert_eq!(parse_hhmm("09:30").unwrap(), t("09:30"));
        assert_eq!(parse_hhmm("00:00").unwrap(), t("00:00"));
    }

    #[test]
    fn test_parse_hhmm_invalid() {
        assert!(matches!(
            parse_hhmm("25:00"),
            Err(SchedulingError::InvalidScheduleData(_))
        ));
        assert!(parse_hhmm("9am").is_err());
        assert!(parse_hhmm("").is_err());
    }

    #[test]
    fn test_no_override_no_weekly_is_closed() {
        let day = resolve_day(None, None, 10);
        assert!(!day.is_working_day);
        assert_eq!(day.start_time, None);
        assert_eq!(day.max_appointments, None);
    }

    #[test]
    fn test_weekly_default_applies() {
        let weekly = weekly("09:00", "18:00", Some(8));
        let day = resolve_day(None, Some(&weekly), 10);
        assert!(day.is_working_day);
        assert_eq!(day.start_time, Some(t("09:00")));
        assert_eq!(day.end_time, Some(t("18:00")));
        assert_eq!(day.max_appointments, Some(8));
    }

    #[test]
    fn test_weekly_without_max_uses_stylist_default() {
        let weekly = weekly("09:00", "18:00", None);
        let day = resolve_day(None, Some(&weekly), 10);
        assert_eq!(day.max_appointments, Some(10));
    }

    #[test]
    fn test_non_working_override_wins() {
        let weekly = weekly("09:00", "18:00", Some(8));
        let ov = override_row(false, Some("09:00"), Some("18:00"), Some(8));
        let day = resolve_day(Some(&ov), Some(&weekly), 10);
        assert!(!day.is_working_day);
    }

    #[test]
    fn test_override_hours_win_over_weekly() {
        let weekly = weekly("09:00", "18:00", Some(8));
        let ov = override_row(true, Some("12:00"), Some("20:00"), None);
        let day = resolve_day(Some(&ov), Some(&weekly), 10);
        assert!(day.is_working_day);
        assert_eq!(day.start_time, Some(t("12:00")));
        assert_eq!(day.end_time, Some(t("20:00")));
        // Unset override max falls back to weekly max
        assert_eq!(day.max_appointments, Some(8));
    }

    #[test]
    fn test_override_partial_fields_fall_back() {
        let weekly = weekly("09:00", "18:00", None);
        let ov = override_row(true, None, Some("14:00"), Some(3));
        let day = resolve_day(Some(&ov), Some(&weekly), 10);
        assert_eq!(day.start_time, Some(t("09:00")));
        assert_eq!(day.end_time, Some(t("14:00")));
        assert_eq!(day.max_appointments, Some(3));
    }

    #[test]
    fn test_working_override_without_any_hours_is_closed() {
        let ov = override_row(true, None, None, None);
        let day = resolve_day(Some(&ov), None, 10);
        assert!(!day.is_working_day);
    }

    #[test]
    fn test_override_with_inverted_hours_is_closed() {
        let ov = override_row(true, Some("18:00"), Some("09:00"), None);
        let day = resolve_day(Some(&ov), None, 10);
        assert!(!day.is_working_day);
    }

    #[test]
    fn test_contains_interval() {
        let weekly = weekly("09:00", "12:00", None);
        let day = resolve_day(None, Some(&weekly), 10);

        assert!(day.contains_interval(t("09:00"), t("09:30")));
        // Ending exactly at closing time is allowed
        assert!(day.contains_interval(t("11:30"), t("12:00")));
        assert!(!day.contains_interval(t("11:45"), t("12:15")));
        assert!(!day.contains_interval(t("08:30"), t("09:00")));
        assert!(!ResolvedDay::closed().contains_interval(t("09:00"), t("09:30")));
    }
}
