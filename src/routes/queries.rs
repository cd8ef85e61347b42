use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db::table::run;
use crate::error::HubError;
use crate::query::{canned_query, CANNED_QUERIES};
use crate::state::AppState;

// ── Query params ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RunQuery {
    name: String,
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/queries", get(api_queries))
        .route("/api/queries/run", get(api_run_query))
}

// ── Handlers ─────────────────────────────────────────────────────────────

/// Canned query menu, for the frontend's select box.
async fn api_queries() -> Json<Value> {
    Json(json!({
        "ok": true,
        "queries": CANNED_QUERIES,
    }))
}

/// Execute one canned query by display name.
async fn api_run_query(
    State(state): State<Arc<AppState>>,
    Query(q): Query<RunQuery>,
) -> Result<Json<Value>, HubError> {
    let canned = canned_query(&q.name)?;
    let conn = state.conn()?;

    let built = canned.built();
    let table = match run(&conn, &built)? {
        Some(t) => t,
        None => {
            return Ok(Json(json!({
                "ok": true,
                "empty": true,
                "name": canned.name,
            })));
        }
    };

    Ok(Json(json!({
        "ok": true,
        "empty": false,
        "name": canned.name,
        "count": table.rows.len(),
        "columns": table.columns,
        "rows": table.rows,
    })))
}
