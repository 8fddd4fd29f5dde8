//! Veterinarian handlers for the REST API, including the schedule view.

use std::time::Instant;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use vetclinic_types::appointment::AppointmentSummary;
use vetclinic_types::veterinarian::{CreateVeterinarianRequest, Veterinarian, VeterinarianId};

use crate::http::error::AppError;
use crate::http::extractors::query::ScheduleQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/veterinarians - Register a veterinarian.
pub async fn create_veterinarian(
    State(state): State<AppState>,
    body: Result<Json<Option<CreateVeterinarianRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Veterinarian>>), AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let Json(request) = body?;
    let vet = state.veterinarians().create(request).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(vet, request_id, elapsed)),
    ))
}

/// GET /api/v1/veterinarians/{id}
pub async fn get_veterinarian(
    State(state): State<AppState>,
    id: Result<Path<VeterinarianId>, PathRejection>,
) -> Result<Json<ApiResponse<Veterinarian>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let Path(id) = id?;
    let vet = state.veterinarians().get_by_id(&id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(vet, request_id, elapsed)))
}

/// GET /api/v1/veterinarians/{id}/appointments?start_date=..&end_date=..
///
/// Appointments overlapping the half-open window, ordered by start time.
pub async fn list_schedule(
    State(state): State<AppState>,
    id: Result<Path<VeterinarianId>, PathRejection>,
    query: Result<Query<ScheduleQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<AppointmentSummary>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let Path(id) = id?;
    let Query(window) = query?;
    let schedule = state
        .appointments()
        .list_by_veterinarian_and_range(&id, window.start_date, window.end_date)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(schedule, request_id, elapsed)))
}
