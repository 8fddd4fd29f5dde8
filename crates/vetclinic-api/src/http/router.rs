//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Animals
        .route("/animals", post(handlers::animal::create_animal))
        .route(
            "/animals/{id}",
            get(handlers::animal::get_animal).delete(handlers::animal::delete_animal),
        )
        // Owners
        .route("/owners", post(handlers::owner::create_owner))
        .route("/owners/{id}", get(handlers::owner::get_owner))
        // Veterinarians
        .route(
            "/veterinarians",
            post(handlers::veterinarian::create_veterinarian),
        )
        .route(
            "/veterinarians/{id}",
            get(handlers::veterinarian::get_veterinarian),
        )
        .route(
            "/veterinarians/{id}/appointments",
            get(handlers::veterinarian::list_schedule),
        )
        // Appointments
        .route(
            "/appointments",
            post(handlers::appointment::create_appointment),
        )
        .route(
            "/appointments/{id}",
            get(handlers::appointment::get_appointment),
        )
        .route(
            "/appointments/{id}/status",
            patch(handlers::appointment::update_status),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
