// crates/campus-care-server/src/web/mod.rs
// Web server layer for Campus Care

pub mod api;
pub mod error;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::web::state::AppState;

/// Create the web server router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes (REST)
    let api_router = Router::new()
        .route("/chat", post(api::chat))
        .route("/crisis/check", post(api::crisis_check))
        .route("/instruments", get(api::list_instruments))
        .route("/instruments/{instrument}", get(api::get_instrument))
        .route("/assessments/{instrument}/score", post(api::score_assessment))
        .route("/assessments/{instrument}/submit", post(api::submit_assessment))
        .with_state(state);

    Router::new()
        // Health check at root level
        .route("/health", get(api::health))
        .nest("/api", api_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
