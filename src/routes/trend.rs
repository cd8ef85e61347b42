use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db::coins::list_top_coins;
use crate::db::table::run;
use crate::error::HubError;
use crate::query::{trend_query, CoinCatalog, DateRange};
use crate::state::AppState;

// ── Query params ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    coin: String,
    start: String,
    end: String,
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/coins", get(api_coins))
        .route("/api/trend", get(api_trend))
}

// ── Handlers ─────────────────────────────────────────────────────────────

/// Coin identifiers offered by the trend selector.
async fn api_coins(State(state): State<Arc<AppState>>) -> Result<Json<Value>, HubError> {
    let conn = state.conn()?;
    let coins = list_top_coins(&conn, state.config.top_coins)?;
    Ok(Json(json!({
        "ok": true,
        "coins": coins,
    })))
}

/// Single-asset price series over an inclusive date range.
///
/// The coin identifier is validated against the same top-N catalog the
/// selector is populated from, so arbitrary identifiers never reach SQL.
async fn api_trend(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TrendQuery>,
) -> Result<Json<Value>, HubError> {
    let range = DateRange::parse(&q.start, &q.end)?;
    let conn = state.conn()?;

    let catalog = CoinCatalog::new(list_top_coins(&conn, state.config.top_coins)?);
    let built = trend_query(&catalog, &q.coin, &range)?;

    let table = match run(&conn, &built)? {
        Some(t) => t,
        None => {
            return Ok(Json(json!({
                "ok": true,
                "empty": true,
                "coin": q.coin,
                "start": range.start_iso(),
                "end": range.end_iso(),
            })));
        }
    };

    Ok(Json(json!({
        "ok": true,
        "empty": false,
        "coin": q.coin,
        "start": range.start_iso(),
        "end": range.end_iso(),
        "count": table.rows.len(),
        "columns": table.columns,
        "rows": table.rows,
    })))
}
