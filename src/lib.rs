// FitMind - multi-agent gym and nutrition planner

pub mod config;
pub mod models;
pub mod types;
pub mod profile;   // BMI validation and seed prompt
pub mod agents;
pub mod llm;
pub mod search;    // Tavily web search
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
// Note: import items from `types` explicitly; `llm` re-exports them too

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
