use rusqlite::{params, Connection};

use crate::error::DataAccessError;

/// Coin identifiers the trend selector offers: top N by market-cap rank.
///
/// This is also the source of the catalog that validates coin input before
/// a trend query is built.
pub fn list_top_coins(conn: &Connection, n: u32) -> Result<Vec<String>, DataAccessError> {
    let mut stmt =
        conn.prepare("SELECT id FROM cryptocurrencies ORDER BY market_cap_rank LIMIT ?")?;

    let ids: Vec<String> = stmt
        .query_map(params![n], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ids)
}
