//! Animal handlers for the REST API.

use std::time::Instant;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;

use vetclinic_types::animal::{AnimalId, AnimalWithOwner, CreateAnimalRequest};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/animals - Register an animal.
pub async fn create_animal(
    State(state): State<AppState>,
    body: Result<Json<Option<CreateAnimalRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<AnimalWithOwner>>), AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let Json(request) = body?;
    let created = state.animals().create(request).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(created, request_id, elapsed)),
    ))
}

/// GET /api/v1/animals/{id} - Get an animal with its owner.
pub async fn get_animal(
    State(state): State<AppState>,
    id: Result<Path<AnimalId>, PathRejection>,
) -> Result<Json<ApiResponse<AnimalWithOwner>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let Path(id) = id?;
    let animal = state.animals().get_by_id(&id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(animal, request_id, elapsed)))
}

/// DELETE /api/v1/animals/{id} - Remove an animal.
pub async fn delete_animal(
    State(state): State<AppState>,
    id: Result<Path<AnimalId>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.animals().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
