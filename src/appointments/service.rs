use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use serde_json::json;
use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

use super::code_generator::generate_code;
use super::error::AppointmentError;
use super::models::{
    Appointment, AppointmentChangeLog, AppointmentListQuery, AppointmentStatus,
    CancelAppointmentRequest, ChangeType, CreateAppointmentRequest, SlotQuery, SlotResponse,
    UpdateAppointmentRequest, VerifyAppointmentRequest,
};
use super::repository::{AppointmentsRepository, ChangeLogRepository, CustomersRepository};
use super::selector::StylistPicker;
use super::status_machine::{check_transition, TransitionCheck};
use crate::config::BookingConfig;
use crate::models::Service;
use crate::scheduling::{on_slot_grid, parse_hhmm, AvailabilityChecker, CalendarResolver};
use crate::stylists::models::Stylist;
use crate::stylists::repository::StylistsRepository;

const SLOT_UNIQUE_INDEX: &str = "idx_appointments_live_slot";
const CODE_UNIQUE_CONSTRAINT: &str = "appointments_appointment_code_key";

/// Service orchestrating the booking workflow: slot listing, appointment
/// creation, rescheduling, status transitions and self-service lookup.
#[derive(Clone)]
pub struct BookingService {
    pool: PgPool,
    config: BookingConfig,
    appointments: AppointmentsRepository,
    customers: CustomersRepository,
    change_log: ChangeLogRepository,
    stylists: StylistsRepository,
    calendar: CalendarResolver,
    availability: AvailabilityChecker,
    picker: Arc<dyn StylistPicker>,
}

/// Everything resolved and validated ahead of a booking write
struct PlannedBooking {
    service: Service,
    stylist: Stylist,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl BookingService {
    pub fn new(pool: PgPool, config: BookingConfig, picker: Arc<dyn StylistPicker>) -> Self {
        let calendar = CalendarResolver::new(pool.clone());
        Self {
            appointments: AppointmentsRepository::new(pool.clone()),
            customers: CustomersRepository::new(),
            change_log: ChangeLogRepository::new(pool.clone()),
            stylists: StylistsRepository::new(pool.clone()),
            availability: AvailabilityChecker::new(pool.clone(), calendar.clone()),
            calendar,
            pool,
            config,
            picker,
        }
    }

    /// List candidate slots for a date and service, each flagged with
    /// current availability. Slots are ordered by start time then stylist.
    pub async fn list_available_slots(
        &self,
        query: &SlotQuery,
    ) -> Result<Vec<SlotResponse>, AppointmentError> {
        let service = self
            .appointments
            .find_service(query.service_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or(AppointmentError::ServiceNotFound(query.service_id))?;

        let candidates = self
            .candidate_stylists(&service, query.stylist_id)
            .await?;

        let duration = service.duration_minutes as u32;
        let mut slots = Vec::new();
        for stylist in &candidates {
            let day = self.calendar.resolve(stylist.id, query.date).await?;
            if !day.is_working_day {
                continue;
            }
            let (Some(work_start), Some(work_end)) = (day.start_time, day.end_time) else {
                continue;
            };
            let has_capacity = self
                .availability
                .has_capacity(stylist.id, query.date, None)
                .await?;
            for window in
                crate::scheduling::walk_windows(work_start, work_end, duration, self.config.slot_minutes)
            {
                let free = has_capacity
                    && self
                        .availability
                        .is_interval_free(
                            query.date,
                            window.start,
                            window.end,
                            Some(stylist.id),
                            None,
                        )
                        .await?;
                slots.push(SlotResponse {
                    id: 0,
                    date: query.date,
                    start_time: window.start.format("%H:%M").to_string(),
                    end_time: window.end.format("%H:%M").to_string(),
                    is_available: free,
                    stylist_id: stylist.id,
                });
            }
        }

        slots.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then(a.stylist_id.cmp(&b.stylist_id))
        });
        for (i, slot) in slots.iter_mut().enumerate() {
            slot.id = (i + 1) as i32;
        }
        Ok(slots)
    }

    /// Book a new appointment. Runs the full validation pipeline, then
    /// writes the appointment, the customer upsert and the audit entry in
    /// one transaction. Collisions on the slot index surface as 409.
    pub async fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        request
            .validate()
            .map_err(|e| AppointmentError::ValidationError(e.to_string()))?;
        if !self.config.is_valid_phone(&request.customer_phone) {
            return Err(AppointmentError::ValidationError(
                "Invalid phone number format".to_string(),
            ));
        }

        let actor = request.actor.as_deref().unwrap_or("customer");
        let mut booking_attempts = 0;
        'replan: loop {
            booking_attempts += 1;
            // Planning re-runs on a lost slot race; the stylist whose row
            // won the index now fails the overlap check and drops out of
            // the candidate pool.
            let plan = self
                .plan_booking(
                    request.service_id,
                    request.stylist_id,
                    request.date,
                    &request.start_time,
                    &request.end_time,
                    None,
                )
                .await?;

            let mut code_attempts = 0;
            loop {
                code_attempts += 1;
                let code = generate_code(&mut rand::thread_rng());

                let mut tx = self.pool.begin().await.map_err(AppointmentError::from)?;
                let customer = self
                    .customers
                    .find_or_create(&mut tx, &request.customer_name, &request.customer_phone)
                    .await?;

                let inserted = self
                    .appointments
                    .create_in_tx(
                        &mut tx,
                        &code,
                        &customer,
                        &plan.service,
                        plan.stylist.id,
                        &plan.stylist.name,
                        plan.date,
                        plan.start_time,
                        plan.end_time,
                        request.notes.as_deref(),
                    )
                    .await;

                match inserted {
                    Ok(appointment) => {
                        self.change_log
                            .append_in_tx(
                                &mut tx,
                                appointment.id,
                                actor,
                                &json!({}),
                                &snapshot(&appointment),
                                ChangeType::Create,
                            )
                            .await?;
                        tx.commit().await.map_err(AppointmentError::from)?;
                        info!(
                            appointment_id = appointment.id,
                            code = %appointment.appointment_code,
                            stylist_id = plan.stylist.id,
                            "appointment created"
                        );
                        return Ok(appointment);
                    }
                    Err(err) => {
                        let constraint = err
                            .as_database_error()
                            .and_then(|db| db.constraint())
                            .map(str::to_owned);
                        drop(tx);
                        match constraint.as_deref() {
                            Some(SLOT_UNIQUE_INDEX) => {
                                warn!(
                                    stylist_id = plan.stylist.id,
                                    date = %plan.date,
                                    "slot taken by a concurrent booking"
                                );
                                // With no pinned stylist another candidate
                                // may still be free for the same interval
                                if request.stylist_id.is_none()
                                    && booking_attempts < self.config.booking_retry_attempts
                                {
                                    continue 'replan;
                                }
                                return Err(AppointmentError::Conflict(
                                    "The selected slot was just booked by someone else"
                                        .to_string(),
                                ));
                            }
                            Some(CODE_UNIQUE_CONSTRAINT)
                                if code_attempts < self.config.code_max_attempts =>
                            {
                                continue;
                            }
                            _ => return Err(AppointmentError::from(err)),
                        }
                    }
                }
            }
        }
    }

    /// Reschedule or edit an appointment. The slot checks re-run only when
    /// a scheduling field (service, stylist, date or time) actually
    /// changes, with the appointment itself excluded so its own row does
    /// not conflict with or fill up its slot. Edits touching only
    /// customer details or notes skip the booking pipeline entirely.
    pub async fn update_appointment(
        &self,
        id: i32,
        request: &UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        request
            .validate()
            .map_err(|e| AppointmentError::ValidationError(e.to_string()))?;
        if let Some(phone) = &request.customer_phone {
            if !self.config.is_valid_phone(phone) {
                return Err(AppointmentError::ValidationError(
                    "Invalid phone number format".to_string(),
                ));
            }
        }

        let mut tx = self.pool.begin().await.map_err(AppointmentError::from)?;
        let existing = self
            .appointments
            .find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        if existing.status.is_terminal() {
            return Err(AppointmentError::InvalidTransition(format!(
                "Cannot modify a {} appointment",
                existing.status
            )));
        }

        let (service_id, service_name, stylist_id, stylist_name, date, start_time, end_time) =
            if wants_reschedule(request, &existing) {
                let merged_service = request.service_id.unwrap_or(existing.service_id);
                let merged_stylist = request.stylist_id.or(existing.stylist_id);
                let merged_date = request.date.unwrap_or(existing.date);
                let start_hhmm = match &request.start_time {
                    Some(s) => s.clone(),
                    None => existing.start_time.format("%H:%M").to_string(),
                };
                let end_hhmm = match &request.end_time {
                    Some(s) => s.clone(),
                    None => existing.end_time.format("%H:%M").to_string(),
                };

                let plan = self
                    .plan_booking(
                        merged_service,
                        merged_stylist,
                        merged_date,
                        &start_hhmm,
                        &end_hhmm,
                        Some(id),
                    )
                    .await?;
                (
                    plan.service.id,
                    plan.service.name,
                    Some(plan.stylist.id),
                    Some(plan.stylist.name),
                    plan.date,
                    plan.start_time,
                    plan.end_time,
                )
            } else {
                (
                    existing.service_id,
                    existing.service_name.clone(),
                    existing.stylist_id,
                    existing.stylist_name.clone(),
                    existing.date,
                    existing.start_time,
                    existing.end_time,
                )
            };

        let customer_name = request
            .customer_name
            .as_deref()
            .unwrap_or(&existing.customer_name);
        let customer_phone = request
            .customer_phone
            .as_deref()
            .unwrap_or(&existing.customer_phone);
        let notes = request.notes.as_deref().or(existing.notes.as_deref());

        let updated = self
            .appointments
            .update_in_tx(
                &mut tx,
                id,
                customer_name,
                customer_phone,
                service_id,
                &service_name,
                stylist_id,
                stylist_name.as_deref(),
                date,
                start_time,
                end_time,
                notes,
            )
            .await
            .map_err(|err| {
                let slot_taken = err
                    .as_database_error()
                    .and_then(|db| db.constraint())
                    .map(|c| c == SLOT_UNIQUE_INDEX)
                    .unwrap_or(false);
                if slot_taken {
                    AppointmentError::Conflict(
                        "The selected slot was just booked by someone else".to_string(),
                    )
                } else {
                    AppointmentError::from(err)
                }
            })?;

        let actor = request.actor.as_deref().unwrap_or("customer");
        self.change_log
            .append_in_tx(
                &mut tx,
                id,
                actor,
                &snapshot(&existing),
                &snapshot(&updated),
                ChangeType::Update,
            )
            .await?;
        tx.commit().await.map_err(AppointmentError::from)?;
        info!(appointment_id = id, "appointment updated");
        Ok(updated)
    }

    /// Move an appointment through its lifecycle. Re-requesting the
    /// current status succeeds without writing anything.
    pub async fn set_status(
        &self,
        id: i32,
        target: AppointmentStatus,
        actor: Option<&str>,
    ) -> Result<Appointment, AppointmentError> {
        let mut tx = self.pool.begin().await.map_err(AppointmentError::from)?;
        let existing = self
            .appointments
            .find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        match check_transition(existing.status, target) {
            TransitionCheck::NoOp => {
                tx.rollback().await.map_err(AppointmentError::from)?;
                return Ok(existing);
            }
            TransitionCheck::Rejected => {
                return Err(AppointmentError::InvalidTransition(format!(
                    "Cannot move from {} to {}",
                    existing.status, target
                )));
            }
            TransitionCheck::Allowed => {}
        }

        let updated = self
            .appointments
            .update_status_in_tx(&mut tx, id, target)
            .await?;

        if target == AppointmentStatus::Completed {
            if let Some(stylist_id) = updated.stylist_id {
                self.stylists
                    .increment_appointment_count(&mut tx, stylist_id)
                    .await?;
            }
        }

        let change_type = if target == AppointmentStatus::Cancelled {
            ChangeType::Cancel
        } else {
            ChangeType::StatusChange
        };
        self.change_log
            .append_in_tx(
                &mut tx,
                id,
                actor.unwrap_or("admin"),
                &json!({ "status": existing.status }),
                &json!({ "status": target }),
                change_type,
            )
            .await?;
        tx.commit().await.map_err(AppointmentError::from)?;
        info!(appointment_id = id, status = %target, "appointment status changed");
        Ok(updated)
    }

    /// Cancel an appointment. A supplied appointment code must match the
    /// stored one (the customer self-service path always sends it; staff
    /// callers omit it). Cancelling an already-cancelled appointment is a
    /// no-op.
    pub async fn cancel_appointment(
        &self,
        id: i32,
        request: &CancelAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let actor = request.actor.as_deref().unwrap_or("customer");
        if let Some(code) = request.appointment_code.as_deref() {
            let existing = self
                .appointments
                .find_by_id(id)
                .await?
                .ok_or(AppointmentError::NotFound)?;
            if code != existing.appointment_code {
                return Err(AppointmentError::Forbidden(
                    "Appointment code does not match".to_string(),
                ));
            }
        }
        self.set_status(id, AppointmentStatus::Cancelled, Some(actor))
            .await
    }

    /// Customer self-service lookup by appointment code and phone
    pub async fn verify_appointment(
        &self,
        request: &VerifyAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        request
            .validate()
            .map_err(|e| AppointmentError::ValidationError(e.to_string()))?;
        self.appointments
            .find_by_code_and_phone(&request.appointment_code, &request.phone)
            .await?
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn get_appointment(&self, id: i32) -> Result<Appointment, AppointmentError> {
        self.appointments
            .find_by_id(id)
            .await?
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn list_appointments(
        &self,
        query: &AppointmentListQuery,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.appointments.list(query).await?)
    }

    /// Full audit trail for one appointment, oldest first
    pub async fn get_change_log(
        &self,
        appointment_id: i32,
    ) -> Result<Vec<AppointmentChangeLog>, AppointmentError> {
        self.appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;
        Ok(self.change_log.find_by_appointment(appointment_id).await?)
    }

    /// Resolve and validate all booking inputs without writing anything.
    ///
    /// `exclude_appointment_id` lets reschedules ignore their own row in
    /// the overlap check.
    async fn plan_booking(
        &self,
        service_id: i32,
        stylist_id: Option<i32>,
        date: NaiveDate,
        start_hhmm: &str,
        end_hhmm: &str,
        exclude_appointment_id: Option<i32>,
    ) -> Result<PlannedBooking, AppointmentError> {
        let service = self
            .appointments
            .find_service(service_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or(AppointmentError::ServiceNotFound(service_id))?;

        let start_time = parse_hhmm(start_hhmm)
            .map_err(|e| AppointmentError::ValidationError(e.to_string()))?;
        let end_time =
            parse_hhmm(end_hhmm).map_err(|e| AppointmentError::ValidationError(e.to_string()))?;
        if start_time >= end_time {
            return Err(AppointmentError::ValidationError(
                "End time must be after start time".to_string(),
            ));
        }
        let expected_end = start_time + Duration::minutes(i64::from(service.duration_minutes));
        if end_time != expected_end {
            return Err(AppointmentError::ValidationError(format!(
                "Service lasts {} minutes; end time must be {}",
                service.duration_minutes,
                expected_end.format("%H:%M")
            )));
        }

        let now = Local::now().naive_local();
        if date < now.date() || (date == now.date() && start_time <= now.time()) {
            return Err(AppointmentError::ValidationError(
                "Cannot book a slot in the past".to_string(),
            ));
        }

        let stylist = match stylist_id {
            Some(id) => {
                let stylist = self
                    .stylists
                    .find_by_id(id)
                    .await?
                    .filter(|s| s.is_active)
                    .ok_or(AppointmentError::StylistNotFound(id))?;
                if !stylist.can_perform(service.id) {
                    return Err(AppointmentError::Unavailable(format!(
                        "Stylist {} does not offer this service",
                        stylist.name
                    )));
                }
                let day = self.calendar.resolve(stylist.id, date).await?;
                if !day.contains_interval(start_time, end_time) {
                    return Err(AppointmentError::Unavailable(
                        "The stylist is not working during the requested time".to_string(),
                    ));
                }
                if !day
                    .start_time
                    .map(|ws| on_slot_grid(ws, start_time, self.config.slot_minutes))
                    .unwrap_or(false)
                {
                    return Err(AppointmentError::ValidationError(
                        "Start time does not fall on the booking grid".to_string(),
                    ));
                }
                // Overlap is checked before capacity: a collision on the
                // requested interval reports Conflict even when the day is
                // also at its limit
                let free = self
                    .availability
                    .is_interval_free(
                        date,
                        start_time,
                        end_time,
                        Some(stylist.id),
                        exclude_appointment_id,
                    )
                    .await?;
                if !free {
                    return Err(AppointmentError::Conflict(
                        "The requested slot is already booked".to_string(),
                    ));
                }
                if !self
                    .availability
                    .has_capacity(stylist.id, date, exclude_appointment_id)
                    .await?
                {
                    return Err(AppointmentError::Unavailable(
                        "The stylist has reached the daily appointment limit".to_string(),
                    ));
                }
                stylist
            }
            None => {
                // Unassigned requests first require the interval to be
                // free salon-wide before a stylist is chosen
                let free_system_wide = self
                    .availability
                    .is_interval_free(date, start_time, end_time, None, exclude_appointment_id)
                    .await?;
                if !free_system_wide {
                    return Err(AppointmentError::Conflict(
                        "The requested slot is already booked".to_string(),
                    ));
                }

                let candidates = self.stylists.find_active_capable(service.id).await?;
                let mut free = Vec::new();
                for stylist in candidates {
                    if self
                        .is_stylist_free(
                            &stylist,
                            date,
                            start_time,
                            end_time,
                            exclude_appointment_id,
                        )
                        .await?
                    {
                        free.push(stylist);
                    }
                }
                if free.is_empty() {
                    return Err(AppointmentError::Unavailable(
                        "No stylist is available for this slot".to_string(),
                    ));
                }
                let index = self.picker.pick(free.len());
                free.swap_remove(index)
            }
        };

        Ok(PlannedBooking {
            service,
            stylist,
            date,
            start_time,
            end_time,
        })
    }

    /// Whether working hours, grid alignment, daily cap and overlap
    /// checks all pass
    async fn is_stylist_free(
        &self,
        stylist: &Stylist,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        exclude_appointment_id: Option<i32>,
    ) -> Result<bool, AppointmentError> {
        let day = self.calendar.resolve(stylist.id, date).await?;
        if !day.contains_interval(start_time, end_time) {
            return Ok(false);
        }
        if !day
            .start_time
            .map(|ws| on_slot_grid(ws, start_time, self.config.slot_minutes))
            .unwrap_or(false)
        {
            return Ok(false);
        }
        if !self
            .availability
            .has_capacity(stylist.id, date, exclude_appointment_id)
            .await?
        {
            return Ok(false);
        }
        let free = self
            .availability
            .is_interval_free(date, start_time, end_time, Some(stylist.id), exclude_appointment_id)
            .await?;
        Ok(free)
    }

    async fn candidate_stylists(
        &self,
        service: &Service,
        stylist_id: Option<i32>,
    ) -> Result<Vec<Stylist>, AppointmentError> {
        match stylist_id {
            Some(id) => {
                let stylist = self
                    .stylists
                    .find_by_id(id)
                    .await?
                    .filter(|s| s.is_active)
                    .ok_or(AppointmentError::StylistNotFound(id))?;
                if !stylist.can_perform(service.id) {
                    return Err(AppointmentError::Unavailable(format!(
                        "Stylist {} does not offer this service",
                        stylist.name
                    )));
                }
                Ok(vec![stylist])
            }
            None => Ok(self.stylists.find_active_capable(service.id).await?),
        }
    }
}

/// Whether an update touches a field the booking checks depend on.
///
/// Only changes to service, stylist, date or times re-enter the booking
/// pipeline; name, phone and notes edits are free of slot constraints.
/// An unparseable time counts as a change so the pipeline reports the
/// validation failure.
fn wants_reschedule(request: &UpdateAppointmentRequest, existing: &Appointment) -> bool {
    let time_differs = |requested: Option<&str>, current: NaiveTime| {
        requested.map_or(false, |s| parse_hhmm(s).map_or(true, |t| t != current))
    };

    request
        .service_id
        .map_or(false, |v| v != existing.service_id)
        || request
            .stylist_id
            .map_or(false, |v| Some(v) != existing.stylist_id)
        || request.date.map_or(false, |v| v != existing.date)
        || time_differs(request.start_time.as_deref(), existing.start_time)
        || time_differs(request.end_time.as_deref(), existing.end_time)
}

/// JSON snapshot of the fields tracked by the audit log
fn snapshot(appointment: &Appointment) -> serde_json::Value {
    json!({
        "appointment_code": appointment.appointment_code,
        "customer_name": appointment.customer_name,
        "customer_phone": appointment.customer_phone,
        "service_id": appointment.service_id,
        "service_name": appointment.service_name,
        "stylist_id": appointment.stylist_id,
        "stylist_name": appointment.stylist_name,
        "date": appointment.date,
        "start_time": appointment.start_time.format("%H:%M").to_string(),
        "end_time": appointment.end_time.format("%H:%M").to_string(),
        "notes": appointment.notes,
        "status": appointment.status,
    })
}

// The booking pipeline against a live database is covered by the
// integration test suite; the pure pieces it composes (calendar
// resolution, window walking, overlap checks, the status machine and
// code generation) carry their own unit and property tests.

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn stored_appointment() -> Appointment {
        Appointment {
            id: 1,
            appointment_code: "QK483920".to_string(),
            customer_id: Some(3),
            customer_name: "Wang Wei".to_string(),
            customer_phone: "13812345678".to_string(),
            service_id: 2,
            service_name: "Haircut".to_string(),
            stylist_id: Some(5),
            stylist_name: Some("Li Na".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            notes: None,
            status: AppointmentStatus::Pending,
            created_at: NaiveDateTime::default().and_utc(),
            updated_at: NaiveDateTime::default().and_utc(),
        }
    }

    fn empty_update() -> UpdateAppointmentRequest {
        UpdateAppointmentRequest {
            customer_name: None,
            customer_phone: None,
            service_id: None,
            stylist_id: None,
            date: None,
            start_time: None,
            end_time: None,
            notes: None,
            actor: None,
        }
    }

    #[test]
    fn test_notes_and_customer_edits_do_not_reschedule() {
        let existing = stored_appointment();

        let request = UpdateAppointmentRequest {
            customer_name: Some("Zhang San".to_string()),
            customer_phone: Some("13900000000".to_string()),
            notes: Some("prefers quiet corner".to_string()),
            ..empty_update()
        };
        assert!(!wants_reschedule(&request, &existing));
    }

    #[test]
    fn test_restating_the_current_slot_does_not_reschedule() {
        let existing = stored_appointment();

        // All scheduling fields present but equal to what is stored
        let request = UpdateAppointmentRequest {
            service_id: Some(2),
            stylist_id: Some(5),
            date: Some(existing.date),
            start_time: Some("09:00".to_string()),
            end_time: Some("09:30".to_string()),
            ..empty_update()
        };
        assert!(!wants_reschedule(&request, &existing));
    }

    #[test]
    fn test_changed_scheduling_fields_reschedule() {
        let existing = stored_appointment();

        let moved = UpdateAppointmentRequest {
            start_time: Some("10:00".to_string()),
            end_time: Some("10:30".to_string()),
            ..empty_update()
        };
        assert!(wants_reschedule(&moved, &existing));

        let new_stylist = UpdateAppointmentRequest {
            stylist_id: Some(7),
            ..empty_update()
        };
        assert!(wants_reschedule(&new_stylist, &existing));

        let new_date = UpdateAppointmentRequest {
            date: NaiveDate::from_ymd_opt(2025, 6, 3),
            ..empty_update()
        };
        assert!(wants_reschedule(&new_date, &existing));

        let new_service = UpdateAppointmentRequest {
            service_id: Some(9),
            ..empty_update()
        };
        assert!(wants_reschedule(&new_service, &existing));
    }

    #[test]
    fn test_unparseable_time_counts_as_reschedule() {
        let existing = stored_appointment();

        let request = UpdateAppointmentRequest {
            start_time: Some("9am".to_string()),
            ..empty_update()
        };
        assert!(wants_reschedule(&request, &existing));
    }

    #[test]
    fn test_snapshot_includes_tracked_fields() {
        let appointment = stored_appointment();

        let value = snapshot(&appointment);
        assert_eq!(value["appointment_code"], "QK483920");
        assert_eq!(value["start_time"], "09:00");
        assert_eq!(value["status"], "pending");
        assert!(value["notes"].is_null());
    }
}
