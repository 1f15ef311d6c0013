// Availability checker
//
// Read-only queries answering whether an interval is free of conflicting
// appointments and whether a stylist has remaining daily capacity.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use crate::scheduling::calendar::CalendarResolver;
use crate::scheduling::error::SchedulingResult;

/// Half-open interval overlap: `[a_start, a_end)` and `[b_start, b_end)`
/// conflict iff each starts before the other ends. Back-to-back
/// intervals where one's end equals the other's start do not overlap.
pub fn intervals_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Availability Checker
///
/// Both operations are side-effect free. `is_interval_free` checks for
/// overlapping non-cancelled appointments; `has_capacity` compares the
/// day's booking count against the resolved maximum.
#[derive(Clone)]
pub struct AvailabilityChecker {
    pool: PgPool,
    calendar: CalendarResolver,
}

impl AvailabilityChecker {
    /// Create a new AvailabilityChecker
    pub fn new(pool: PgPool, calendar: CalendarResolver) -> Self {
        Self { pool, calendar }
    }

    /// Whether `[start, end)` on `date` is free of conflicting bookings.
    ///
    /// With a stylist the check is scoped to that stylist; without one it
    /// is system-wide (used to validate unassigned requests before a
    /// stylist is chosen). `exclude_appointment_id` removes a specific
    /// appointment from consideration so an update does not conflict
    /// with itself.
    pub async fn is_interval_free(
        &self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        stylist_id: Option<i32>,
        exclude_appointment_id: Option<i32>,
    ) -> SchedulingResult<bool> {
        let conflicting: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM appointments
                WHERE date = $1
                  AND status <> 'cancelled'
                  AND start_time < $3
                  AND end_time > $2
                  AND ($4::integer IS NULL OR stylist_id = $4)
                  AND ($5::integer IS NULL OR id <> $5)
            )
            "#,
        )
        .bind(date)
        .bind(start)
        .bind(end)
        .bind(stylist_id)
        .bind(exclude_appointment_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(!conflicting.unwrap_or(false))
    }

    /// Whether the stylist can take one more non-cancelled appointment on
    /// `date`. A day the stylist is not working has no capacity.
    ///
    /// `exclude_appointment_id` keeps a rescheduled appointment's own row
    /// out of the count; it already occupies one of the day's slots.
    pub async fn has_capacity(
        &self,
        stylist_id: i32,
        date: NaiveDate,
        exclude_appointment_id: Option<i32>,
    ) -> SchedulingResult<bool> {
        let day = self.calendar.resolve(stylist_id, date).await?;

        let Some(max_appointments) = day.max_appointments.filter(|_| day.is_working_day) else {
            return Ok(false);
        };

        let booked = self
            .booked_count(stylist_id, date, exclude_appointment_id)
            .await?;
        Ok(booked < i64::from(max_appointments))
    }

    /// Count of non-cancelled appointments for a stylist on a date
    pub async fn booked_count(
        &self,
        stylist_id: i32,
        date: NaiveDate,
        exclude_appointment_id: Option<i32>,
    ) -> SchedulingResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM appointments
            WHERE stylist_id = $1 AND date = $2 AND status <> 'cancelled'
              AND ($3::integer IS NULL OR id <> $3)
            "#,
        )
        .bind(stylist_id)
        .bind(date)
        .bind(exclude_appointment_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn minutes_to_time(m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap()
    }

    fn interval_strategy() -> impl Strategy<Value = (NaiveTime, NaiveTime)> {
        (0u32..1380, 1u32..120).prop_map(|(start, len)| {
            let end = (start + len).min(1439);
            (minutes_to_time(start), minutes_to_time(end.max(start + 1)))
        })
    }

    proptest! {
        /// Overlap is symmetric in its two intervals.
        #[test]
        fn prop_overlap_is_symmetric(
            a in interval_strategy(),
            b in interval_strategy(),
        ) {
            prop_assert_eq!(
                intervals_overlap(a.0, a.1, b.0, b.1),
                intervals_overlap(b.0, b.1, a.0, a.1)
            );
        }

        /// An interval always overlaps itself.
        #[test]
        fn prop_interval_overlaps_itself(a in interval_strategy()) {
            prop_assert!(intervals_overlap(a.0, a.1, a.0, a.1));
        }

        /// Non-overlap means one interval starts at or after the other's
        /// end, which is the no-double-booking invariant.
        #[test]
        fn prop_non_overlap_means_ordered(
            a in interval_strategy(),
            b in interval_strategy(),
        ) {
            if !intervals_overlap(a.0, a.1, b.0, b.1) {
                prop_assert!(a.0 >= b.1 || b.0 >= a.1);
            }
        }
    }
}
