pub mod overview;
pub mod queries;
pub mod trend;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

/// Assemble the API router.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(api_health))
        .merge(overview::routes())
        .merge(queries::routes())
        .merge(trend::routes())
}

async fn api_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let db_ok = state.conn().is_ok();
    Json(json!({
        "ok": true,
        "db_connected": db_ok,
        "db_path": state.config.db_path.to_string_lossy(),
    }))
}
