//! Appointment handlers for the REST API.

use std::time::Instant;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::Serialize;

use vetclinic_core::policy::status::{migrate_status, valid_statuses_message};
use vetclinic_types::appointment::{
    AppointmentDetails, AppointmentId, AppointmentStatus, CreateAppointmentRequest,
    UpdateAppointmentStatusRequest,
};
use vetclinic_types::outcome::ServiceError;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Body returned after a status change.
#[derive(Debug, Serialize)]
pub struct StatusUpdated {
    pub id: AppointmentId,
    pub status: AppointmentStatus,
    pub message: String,
}

/// POST /api/v1/appointments - Book an appointment.
pub async fn create_appointment(
    State(state): State<AppState>,
    body: Result<Json<Option<CreateAppointmentRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<AppointmentDetails>>), AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let Json(request) = body?;
    let created = state.appointments().create(request).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(created, request_id, elapsed)),
    ))
}

/// GET /api/v1/appointments/{id} - Appointment with animal, owner and veterinarian.
pub async fn get_appointment(
    State(state): State<AppState>,
    id: Result<Path<AppointmentId>, PathRejection>,
) -> Result<Json<ApiResponse<AppointmentDetails>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let Path(id) = id?;
    let details = state.appointments().get_by_id(&id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(details, request_id, elapsed)))
}

/// PATCH /api/v1/appointments/{id}/status - Change an appointment's status.
///
/// The cancellation window is checked against the server clock.
pub async fn update_status(
    State(state): State<AppState>,
    id: Result<Path<AppointmentId>, PathRejection>,
    body: Result<Json<UpdateAppointmentStatusRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<StatusUpdated>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let Path(id) = id?;
    let Json(body) = body?;
    let status: AppointmentStatus = body
        .status
        .parse()
        .map_err(|_| ServiceError::validation(valid_statuses_message()))?;

    state
        .appointments()
        .update_status(&id, status, Utc::now())
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let updated = StatusUpdated {
        id,
        status: migrate_status(status),
        message: "Appointment status updated successfully".to_string(),
    };
    Ok(Json(ApiResponse::success(updated, request_id, elapsed)))
}
