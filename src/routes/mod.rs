//! HTTP Routes
//!
//! - `POST /generate_plan` - Validate a profile and run the agent pipeline
//! - `GET /api/health` - Health check
//! - `/` - Planner form

pub mod health;
pub mod plan;
pub mod ui;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::cors_layer;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .merge(plan::router(state.clone()))
        .merge(health::router(state))
        .merge(ui::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
