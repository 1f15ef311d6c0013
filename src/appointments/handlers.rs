// HTTP handlers for booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::appointments::{
    Appointment, AppointmentChangeLog, AppointmentError, AppointmentListQuery,
    CancelAppointmentRequest, CreateAppointmentRequest, SlotQuery, SlotResponse,
    UpdateAppointmentRequest, UpdateStatusRequest, VerifyAppointmentRequest,
};

/// Handler for GET /api/appointments/slots
/// Lists candidate slots for a date and service
pub async fn list_slots_handler(
    State(state): State<crate::AppState>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Vec<SlotResponse>>, AppointmentError> {
    let slots = state.booking.list_available_slots(&query).await?;
    Ok(Json(slots))
}

/// Handler for POST /api/appointments
/// Books a new appointment
pub async fn create_appointment_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppointmentError> {
    let appointment = state.booking.create_appointment(&request).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// Handler for GET /api/appointments
/// Lists appointments with optional date, stylist and status filters
pub async fn list_appointments_handler(
    State(state): State<crate::AppState>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Vec<Appointment>>, AppointmentError> {
    let appointments = state.booking.list_appointments(&query).await?;
    Ok(Json(appointments))
}

/// Handler for GET /api/appointments/{id}
pub async fn get_appointment_handler(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Appointment>, AppointmentError> {
    let appointment = state.booking.get_appointment(id).await?;
    Ok(Json(appointment))
}

/// Handler for PUT /api/appointments/{id}
/// Reschedules or edits an appointment
pub async fn update_appointment_handler(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppointmentError> {
    let appointment = state.booking.update_appointment(id, &request).await?;
    Ok(Json(appointment))
}

/// Handler for PATCH /api/appointments/{id}/status
/// Moves an appointment through its lifecycle
pub async fn update_status_handler(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, AppointmentError> {
    let appointment = state
        .booking
        .set_status(id, request.status, request.actor.as_deref())
        .await?;
    Ok(Json(appointment))
}

/// Handler for POST /api/appointments/{id}/cancel
pub async fn cancel_appointment_handler(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Appointment>, AppointmentError> {
    let appointment = state.booking.cancel_appointment(id, &request).await?;
    Ok(Json(appointment))
}

/// Handler for POST /api/appointments/verify
/// Customer self-service lookup by code and phone
pub async fn verify_appointment_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<VerifyAppointmentRequest>,
) -> Result<Json<Appointment>, AppointmentError> {
    let appointment = state.booking.verify_appointment(&request).await?;
    Ok(Json(appointment))
}

/// Handler for GET /api/appointments/{id}/history
/// Full audit trail for an appointment, oldest first
pub async fn get_change_log_handler(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<AppointmentChangeLog>>, AppointmentError> {
    let entries = state.booking.get_change_log(id).await?;
    Ok(Json(entries))
}
