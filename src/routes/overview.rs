use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db::table::run;
use crate::error::HubError;
use crate::query::{overview_query, DateRange};
use crate::state::AppState;

// ── Query params ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    #[serde(default = "default_start")]
    start: String,
    #[serde(default = "default_end")]
    end: String,
}

fn default_start() -> String {
    "2025-01-01".to_string()
}

fn default_end() -> String {
    "2025-12-31".to_string()
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/overview", get(api_overview))
}

// ── Handlers ─────────────────────────────────────────────────────────────

/// Cross-market overview: bitcoin price, oil price, and S&P 500 close joined
/// on calendar date, plus the per-series means over the selected range.
async fn api_overview(
    State(state): State<Arc<AppState>>,
    Query(q): Query<RangeQuery>,
) -> Result<Json<Value>, HubError> {
    let range = DateRange::parse(&q.start, &q.end)?;
    let conn = state.conn()?;

    let built = overview_query(&range);
    let table = match run(&conn, &built)? {
        Some(t) => t,
        None => {
            return Ok(Json(json!({
                "ok": true,
                "empty": true,
                "start": range.start_iso(),
                "end": range.end_iso(),
            })));
        }
    };

    // Means are only defined over a non-empty table.
    let summary = json!({
        "bitcoin_avg_price": table.mean("bitcoin_price"),
        "oil_avg_price": table.mean("oil_price"),
        "sp500_avg_close": table.mean("sp500_close"),
    });

    Ok(Json(json!({
        "ok": true,
        "empty": false,
        "start": range.start_iso(),
        "end": range.end_iso(),
        "count": table.rows.len(),
        "columns": table.columns,
        "rows": table.rows,
        "summary": summary,
    })))
}
