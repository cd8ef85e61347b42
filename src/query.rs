use chrono::NaiveDate;
use rusqlite::types::Value;
use serde::Serialize;

use crate::error::ValidationError;

/// The overview chart tracks bitcoin against oil and the S&P 500.
pub const OVERVIEW_COIN: &str = "bitcoin";
pub const OVERVIEW_TICKER: &str = "^GSPC";

// ── Inputs ───────────────────────────────────────────────────────────────

/// An inclusive calendar date range, already parsed and normalized.
///
/// Holding one of these is proof the endpoints were well-formed ISO dates
/// with start <= end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Parse `YYYY-MM-DD` endpoints, rejecting malformed dates and ranges
    /// whose start falls after the end.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::new(start, end)
    }

    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::BackwardsRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start_iso(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_iso(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::BadDate(text.to_string()))
}

/// The coin identifiers the trend view may query, taken from a prior
/// top-N lookup. Identifiers outside the catalog never reach SQL.
#[derive(Debug, Clone)]
pub struct CoinCatalog {
    ids: Vec<String>,
}

impl CoinCatalog {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    pub fn contains(&self, coin_id: &str) -> bool {
        self.ids.iter().any(|id| id == coin_id)
    }

    fn validate(&self, coin_id: &str) -> Result<(), ValidationError> {
        if self.contains(coin_id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownCoin(coin_id.to_string()))
        }
    }
}

// ── Built queries ────────────────────────────────────────────────────────

/// A statement template plus its bound parameters, ready for execution.
/// Caller-supplied values only ever travel through `params`.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub sql: &'static str,
    pub params: Vec<Value>,
}

/// Three-way joined time series: bitcoin price, oil price, and S&P 500
/// close aligned on calendar date, restricted to the range. Dates missing
/// from any of the three series drop out of the inner join.
pub fn overview_query(range: &DateRange) -> BuiltQuery {
    BuiltQuery {
        sql: "SELECT c.date,
                     c.price_usd AS bitcoin_price,
                     o.price_usd AS oil_price,
                     s.close AS sp500_close
              FROM crypto_prices c
              JOIN oil_prices o ON c.date = o.date
              JOIN stock_prices s ON c.date = s.date
              WHERE c.coin_id = ?1 AND s.ticker = ?2
                AND c.date BETWEEN ?3 AND ?4
              ORDER BY c.date ASC",
        params: vec![
            Value::from(OVERVIEW_COIN.to_string()),
            Value::from(OVERVIEW_TICKER.to_string()),
            Value::from(range.start_iso()),
            Value::from(range.end_iso()),
        ],
    }
}

/// Single-asset price series for one catalog-validated coin.
pub fn trend_query(
    coins: &CoinCatalog,
    coin_id: &str,
    range: &DateRange,
) -> Result<BuiltQuery, ValidationError> {
    coins.validate(coin_id)?;
    Ok(BuiltQuery {
        sql: "SELECT date, price_usd
              FROM crypto_prices
              WHERE coin_id = ?1 AND date BETWEEN ?2 AND ?3
              ORDER BY date ASC",
        params: vec![
            Value::from(coin_id.to_string()),
            Value::from(range.start_iso()),
            Value::from(range.end_iso()),
        ],
    })
}

// ── Canned queries ───────────────────────────────────────────────────────

/// A fixed menu entry: display name plus SQL executed verbatim, with no
/// caller-supplied parameters.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CannedQuery {
    pub name: &'static str,
    pub sql: &'static str,
}

impl CannedQuery {
    pub fn built(&self) -> BuiltQuery {
        BuiltQuery {
            sql: self.sql,
            params: Vec::new(),
        }
    }
}

/// The canned query menu (allow-list; nothing outside it runs).
pub const CANNED_QUERIES: &[CannedQuery] = &[
    CannedQuery {
        name: "Top 3 Cryptos",
        sql: "SELECT name, market_cap FROM cryptocurrencies ORDER BY market_cap DESC LIMIT 3;",
    },
    CannedQuery {
        name: "Oil Avg Price 2025",
        sql: "SELECT AVG(price_usd) FROM oil_prices WHERE date BETWEEN '2025-01-01' AND '2025-12-31';",
    },
    CannedQuery {
        name: "NASDAQ Highest Close",
        sql: "SELECT MAX(close) FROM stock_prices WHERE ticker='^IXIC';",
    },
];

/// Look up a canned query by display name.
pub fn canned_query(name: &str) -> Result<&'static CannedQuery, ValidationError> {
    CANNED_QUERIES
        .iter()
        .find(|q| q.name == name)
        .ok_or_else(|| ValidationError::UnknownQuery(name.to_string()))
}
