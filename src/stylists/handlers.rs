// HTTP handlers for stylist and schedule management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;
use crate::scheduling::parse_hhmm;
use crate::stylists::{
    CreateStylist, ScheduleOverride, Stylist, UpsertScheduleOverride, UpsertWeeklyHours,
    WeeklyHours,
};

/// Query parameters for stylist listing
#[derive(Debug, Deserialize)]
pub struct StylistListQuery {
    /// When true, only active stylists are returned
    #[serde(default)]
    pub active_only: bool,
}

/// Query parameters for override listing
#[derive(Debug, Deserialize)]
pub struct OverrideRangeQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Handler for GET /api/stylists
pub async fn list_stylists_handler(
    State(state): State<crate::AppState>,
    Query(query): Query<StylistListQuery>,
) -> Result<Json<Vec<Stylist>>, ApiError> {
    let stylists = state.stylists_repo.find_all(query.active_only).await?;
    Ok(Json(stylists))
}

/// Handler for POST /api/stylists
pub async fn create_stylist_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateStylist>,
) -> Result<(StatusCode, Json<Stylist>), ApiError> {
    request.validate()?;

    let stylist = state.stylists_repo.create(&request).await?;
    tracing::info!("Created stylist {} ({})", stylist.id, stylist.name);

    Ok((StatusCode::CREATED, Json(stylist)))
}

/// Handler for GET /api/stylists/{id}
pub async fn get_stylist_handler(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Stylist>, ApiError> {
    let stylist = state
        .stylists_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Stylist".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(stylist))
}

/// Handler for PUT /api/stylists/{id}/schedule
/// Creates or replaces the per-date schedule override
pub async fn upsert_schedule_override_handler(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpsertScheduleOverride>,
) -> Result<Json<ScheduleOverride>, ApiError> {
    request.validate()?;

    ensure_stylist_exists(&state, id).await?;

    // DTO times are HH:MM strings; validation above guarantees parseable
    let start_time = request
        .start_time
        .as_deref()
        .map(parse_hhmm)
        .transpose()
        .map_err(|e| ApiError::InternalError(e.to_string()))?;
    let end_time = request
        .end_time
        .as_deref()
        .map(parse_hhmm)
        .transpose()
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    let row = state
        .schedules_repo
        .upsert_override(
            id,
            request.date,
            request.is_work_day,
            start_time,
            end_time,
            request.max_appointments,
            request.is_holiday,
            request.is_special_day,
            request.note.as_deref(),
        )
        .await?;

    tracing::info!("Upserted schedule override for stylist {} on {}", id, request.date);
    Ok(Json(row))
}

/// Handler for GET /api/stylists/{id}/schedule
pub async fn list_schedule_overrides_handler(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(range): Query<OverrideRangeQuery>,
) -> Result<Json<Vec<ScheduleOverride>>, ApiError> {
    ensure_stylist_exists(&state, id).await?;

    let rows = state
        .schedules_repo
        .list_overrides(id, range.from, range.to)
        .await?;
    Ok(Json(rows))
}

/// Handler for PUT /api/stylists/{id}/weekly-hours
/// Creates or replaces the weekly default for one weekday
pub async fn upsert_weekly_hours_handler(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpsertWeeklyHours>,
) -> Result<Json<WeeklyHours>, ApiError> {
    request.validate()?;

    ensure_stylist_exists(&state, id).await?;

    let start_time =
        parse_hhmm(&request.start_time).map_err(|e| ApiError::InternalError(e.to_string()))?;
    let end_time =
        parse_hhmm(&request.end_time).map_err(|e| ApiError::InternalError(e.to_string()))?;

    if start_time >= end_time {
        let mut errors = validator::ValidationErrors::new();
        errors.add(
            "end_time",
            validator::ValidationError::new("end_before_start"),
        );
        return Err(ApiError::ValidationError(errors));
    }

    let row = state
        .schedules_repo
        .upsert_weekly_hours(id, request.weekday, start_time, end_time, request.max_appointments)
        .await?;

    Ok(Json(row))
}

/// Handler for GET /api/stylists/{id}/weekly-hours
pub async fn list_weekly_hours_handler(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<WeeklyHours>>, ApiError> {
    ensure_stylist_exists(&state, id).await?;

    let rows = state.schedules_repo.list_weekly_hours(id).await?;
    Ok(Json(rows))
}

async fn ensure_stylist_exists(state: &crate::AppState, id: i32) -> Result<(), ApiError> {
    state
        .stylists_repo
        .find_by_id(id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::NotFound {
            resource: "Stylist".to_string(),
            id: id.to_string(),
        })
}
