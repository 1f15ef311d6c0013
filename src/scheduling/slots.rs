// Slot window generation
//
// Walks a working day in fixed-size steps and produces every window
// that can host a service of the given duration before closing time.
// Pure time arithmetic; availability is layered on by the caller.

use chrono::{Duration, NaiveTime};

/// A candidate `[start, end)` window sized to a service's duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Generate candidate windows within `[work_start, work_end)`.
///
/// Start times advance from `work_start` in `step_minutes` increments.
/// Each window spans `duration_minutes`; windows whose end would pass
/// `work_end` are pruned (a window ending exactly at `work_end` is
/// kept). The duration does not have to be a multiple of the step.
///
/// Output is ordered ascending by start time. The walk is recomputed on
/// every call; nothing is cached between calls.
pub fn walk_windows(
    work_start: NaiveTime,
    work_end: NaiveTime,
    duration_minutes: u32,
    step_minutes: u32,
) -> Vec<SlotWindow> {
    let mut windows = Vec::new();

    if duration_minutes == 0 || step_minutes == 0 || work_start >= work_end {
        return windows;
    }

    let duration = Duration::minutes(i64::from(duration_minutes));
    let step = Duration::minutes(i64::from(step_minutes));

    let mut start = work_start;
    while start < work_end {
        // overflowing_add_signed reports midnight wrap-around, which
        // would otherwise alias an early-morning time
        let (end, wrapped) = start.overflowing_add_signed(duration);
        if wrapped == 0 && end <= work_end {
            windows.push(SlotWindow { start, end });
        }

        let (next, wrapped) = start.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        start = next;
    }

    windows
}

/// Whether `start` lies on the booking grid anchored at `work_start`.
///
/// The grid is the set of start times `walk_windows` would generate for
/// the same day and step. Bookings off the grid are rejected: two
/// overlapping requests with staggered starts would otherwise both slip
/// past the unique index on (stylist, date, start_time).
pub fn on_slot_grid(work_start: NaiveTime, start: NaiveTime, step_minutes: u32) -> bool {
    if step_minutes == 0 || start < work_start {
        return false;
    }
    let offset = start.signed_duration_since(work_start);
    offset.num_seconds() % 60 == 0 && offset.num_minutes() % i64::from(step_minutes) == 0
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn minutes_to_time(m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap()
    }

    proptest! {
        /// Every generated window fits entirely inside working hours
        /// and spans exactly the service duration.
        #[test]
        fn prop_windows_fit_working_hours(
            start_min in 0u32..720,
            span in 1u32..720,
            duration in 1u32..240,
            step in prop_oneof![Just(15u32), Just(30u32), Just(60u32)],
        ) {
            let end_min = (start_min + span).min(1439);
            let work_start = minutes_to_time(start_min);
            let work_end = minutes_to_time(end_min);

            let windows = walk_windows(work_start, work_end, duration, step);
            for w in &windows {
                prop_assert!(w.start >= work_start);
                prop_assert!(w.end <= work_end);
                prop_assert_eq!(
                    w.end.signed_duration_since(w.start).num_minutes(),
                    i64::from(duration)
                );
            }
        }

        /// Windows come out strictly ascending by start time.
        #[test]
        fn prop_windows_are_ordered(
            duration in 1u32..180,
            step in 1u32..120,
        ) {
            let windows = walk_windows(
                minutes_to_time(9 * 60),
                minutes_to_time(20 * 60),
                duration,
                step,
            );
            for pair in windows.windows(2) {
                prop_assert!(pair[0].start < pair[1].start);
            }
        }
    }
}
