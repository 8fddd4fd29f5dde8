//! Owner handlers for the REST API.

use std::time::Instant;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;

use vetclinic_types::owner::{CreateOwnerRequest, Owner, OwnerId};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/owners - Register an owner.
pub async fn create_owner(
    State(state): State<AppState>,
    body: Result<Json<Option<CreateOwnerRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Owner>>), AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let Json(request) = body?;
    let owner = state.owners().create(request).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(owner, request_id, elapsed)),
    ))
}

/// GET /api/v1/owners/{id}
pub async fn get_owner(
    State(state): State<AppState>,
    id: Result<Path<OwnerId>, PathRejection>,
) -> Result<Json<ApiResponse<Owner>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let Path(id) = id?;
    let owner = state.owners().get_by_id(&id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(owner, request_id, elapsed)))
}
