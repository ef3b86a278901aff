use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use std::time::Instant;
use tracing::info;

use crate::agents::execute_plan_pipeline;
use crate::models::{AppState, PlanRequest, PlanResponse};
use crate::profile::build_seed_prompt;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate_plan", post(generate_plan))
        .with_state(state)
}

pub async fn generate_plan(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> AppResult<Json<PlanResponse>> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let started = Instant::now();

    let (profile, bmi) = request.into_profile()?;
    info!(
        bmi = bmi.bmi(),
        category = %bmi.category(),
        goal = %profile.goal,
        "Received plan request"
    );

    let seed_prompt = build_seed_prompt(&profile, &bmi);
    let plan =
        execute_plan_pipeline(&state.pipeline, seed_prompt, &state.config.agents.plan_marker)
            .await?;

    info!(elapsed_ms = started.elapsed().as_millis() as u64, "Plan generated");

    Ok(Json(PlanResponse {
        plan,
        bmi: bmi.bmi(),
        bmi_category: bmi.category().to_string(),
    }))
}
