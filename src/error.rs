use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde_json::json;

/// Rejected caller input. Raised before any SQL is built or executed, so
/// nothing in this enum ever reaches the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    BadDate(String),
    BackwardsRange { start: NaiveDate, end: NaiveDate },
    UnknownCoin(String),
    UnknownQuery(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadDate(text) => write!(f, "invalid date: {text} (expected YYYY-MM-DD)"),
            Self::BackwardsRange { start, end } => {
                write!(f, "start {start} falls after end {end}")
            }
            Self::UnknownCoin(id) => write!(f, "unknown coin: {id}"),
            Self::UnknownQuery(name) => write!(f, "unknown query: {name}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Database-side failure: the connection could not be opened or the query
/// did not execute. Carries the underlying cause text for diagnostics.
#[derive(Debug)]
pub enum DataAccessError {
    Unavailable(String),
    Query(String),
}

impl std::fmt::Display for DataAccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "db unavailable: {msg}"),
            Self::Query(msg) => write!(f, "query failed: {msg}"),
        }
    }
}

impl std::error::Error for DataAccessError {}

impl From<rusqlite::Error> for DataAccessError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Query(e.to_string())
    }
}

impl From<r2d2::Error> for DataAccessError {
    fn from(e: r2d2::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}

/// Unified error type for hub API responses.
#[derive(Debug)]
pub enum HubError {
    Validation(ValidationError),
    Db(DataAccessError),
}

impl std::fmt::Display for HubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "bad_request: {e}"),
            Self::Db(e) => write!(f, "db_error: {e}"),
        }
    }
}

impl std::error::Error for HubError {}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let (status, error_str) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Db(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        if status.is_server_error() {
            tracing::warn!("request failed: {error_str}");
        }

        let body = json!({ "error": error_str });
        (status, axum::Json(body)).into_response()
    }
}

impl From<ValidationError> for HubError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DataAccessError> for HubError {
    fn from(e: DataAccessError) -> Self {
        Self::Db(e)
    }
}
