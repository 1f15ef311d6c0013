// Scheduling subsystem
//
// Three read-side pieces the booking write path builds on:
// - calendar: resolves a stylist's working hours for a date, layering
//   per-date overrides over weekly defaults
// - slots: walks a working day into candidate service-sized windows
// - availability: overlap and daily-capacity checks against stored
//   appointments

pub mod availability;
pub mod calendar;
pub mod error;
pub mod slots;

pub use availability::{intervals_overlap, AvailabilityChecker};
pub use calendar::{parse_hhmm, resolve_day, CalendarResolver, ResolvedDay};
pub use error::{SchedulingError, SchedulingResult};
pub use slots::{on_slot_grid, walk_windows, SlotWindow};
