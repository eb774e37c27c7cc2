//! Serves the synthesized API document at its fixed path.

use crate::openapi::ApiDocument;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};

async fn api_docs(State(state): State<AppState>) -> Json<ApiDocument> {
    Json(state.document.as_ref().clone())
}

/// GET /api-docs returns the OpenAPI document as JSON.
pub fn docs_routes(state: AppState) -> Router {
    Router::new()
        .route("/api-docs", get(api_docs))
        .with_state(state)
}
