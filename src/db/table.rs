use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection};
use serde::Serialize;

use crate::error::DataAccessError;
use crate::query::BuiltQuery;

/// One typed value out of a result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    /// Numeric view of the cell. Integers widen to f64; text and null
    /// have no numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(v) => Some(*v as f64),
            Cell::Real(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<ValueRef<'_>> for Cell {
    fn from(v: ValueRef<'_>) -> Self {
        match v {
            ValueRef::Null => Cell::Null,
            ValueRef::Integer(i) => Cell::Integer(i),
            ValueRef::Real(r) => Cell::Real(r),
            ValueRef::Text(t) => Cell::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Cell::Text(String::from_utf8_lossy(b).into_owned()),
        }
    }
}

/// An in-memory result table: named columns plus rows in the exact order
/// the database produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All numeric cells of a column, in row order.
    fn column_f64(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.get(idx).and_then(Cell::as_f64))
                .collect(),
        )
    }

    /// Arithmetic mean of a column's numeric cells. `None` when the column
    /// is missing or holds no numeric cells, never NaN.
    pub fn mean(&self, column: &str) -> Option<f64> {
        let values = self.column_f64(column)?;
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    pub fn max(&self, column: &str) -> Option<f64> {
        self.column_f64(column)?.into_iter().reduce(f64::max)
    }

    pub fn min(&self, column: &str) -> Option<f64> {
        self.column_f64(column)?.into_iter().reduce(f64::min)
    }
}

/// Execute a built query and materialize every row.
///
/// `Ok(None)` is the zero-row outcome, distinct from both a populated table
/// and a failure, so callers skip aggregates instead of computing them over
/// nothing.
pub fn run(conn: &Connection, query: &BuiltQuery) -> Result<Option<Table>, DataAccessError> {
    let mut stmt = conn.prepare(query.sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

    let mut rows = stmt.query(params_from_iter(query.params.iter()))?;
    let mut out: Vec<Vec<Cell>> = Vec::new();
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            cells.push(Cell::from(row.get_ref(i)?));
        }
        out.push(cells);
    }

    if out.is_empty() {
        return Ok(None);
    }
    Ok(Some(Table { columns, rows: out }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::SCHEMA_SQL;
    use rusqlite::types::Value;
    use rusqlite::Connection;
    use serde_json::json;

    fn mem_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA_SQL).unwrap();
        conn
    }

    fn fixed(sql: &'static str) -> BuiltQuery {
        BuiltQuery {
            sql,
            params: Vec::new(),
        }
    }

    #[test]
    fn run_materializes_typed_cells_in_db_order() {
        let conn = mem_db();
        conn.execute_batch(
            "INSERT INTO oil_prices (date, price_usd) VALUES ('2025-01-02', 81.5);
             INSERT INTO oil_prices (date, price_usd) VALUES ('2025-01-01', 80.0);",
        )
        .unwrap();

        let table = run(
            &conn,
            &fixed("SELECT date, price_usd FROM oil_prices ORDER BY date ASC"),
        )
        .unwrap()
        .unwrap();

        assert_eq!(table.columns, vec!["date", "price_usd"]);
        assert_eq!(
            table.rows,
            vec![
                vec![Cell::Text("2025-01-01".to_string()), Cell::Real(80.0)],
                vec![Cell::Text("2025-01-02".to_string()), Cell::Real(81.5)],
            ]
        );
    }

    #[test]
    fn run_distinguishes_zero_rows_from_failure() {
        let conn = mem_db();
        let got = run(&conn, &fixed("SELECT date FROM oil_prices")).unwrap();
        assert!(got.is_none());

        let err = run(&conn, &fixed("SELECT nope FROM missing_table"));
        assert!(matches!(err, Err(DataAccessError::Query(_))));
    }

    #[test]
    fn run_binds_parameters() {
        let conn = mem_db();
        conn.execute_batch(
            "INSERT INTO oil_prices (date, price_usd) VALUES ('2025-01-01', 80.0);",
        )
        .unwrap();

        let q = BuiltQuery {
            sql: "SELECT price_usd FROM oil_prices WHERE date = ?1",
            params: vec![Value::from("2025-01-01".to_string())],
        };
        let table = run(&conn, &q).unwrap().unwrap();
        assert_eq!(table.rows, vec![vec![Cell::Real(80.0)]]);
    }

    #[test]
    fn aggregates_skip_non_numeric_cells_and_never_yield_nan() {
        let table = Table {
            columns: vec!["date".to_string(), "price_usd".to_string()],
            rows: vec![
                vec![Cell::Text("2025-01-01".to_string()), Cell::Real(70.0)],
                vec![Cell::Text("2025-01-02".to_string()), Cell::Null],
                vec![Cell::Text("2025-01-03".to_string()), Cell::Integer(90)],
            ],
        };

        assert_eq!(table.mean("price_usd"), Some(80.0));
        assert_eq!(table.max("price_usd"), Some(90.0));
        assert_eq!(table.min("price_usd"), Some(70.0));

        // Text column has no numeric cells; missing column has no index.
        assert_eq!(table.mean("date"), None);
        assert_eq!(table.mean("volume"), None);
    }

    #[test]
    fn null_avg_row_is_success_without_aggregates() {
        // AVG over an empty table yields one row holding SQL NULL: success
        // with rows, not the zero-row outcome.
        let conn = mem_db();
        let table = run(&conn, &fixed("SELECT AVG(price_usd) FROM oil_prices"))
            .unwrap()
            .unwrap();

        assert_eq!(table.rows, vec![vec![Cell::Null]]);
        assert_eq!(table.mean(&table.columns[0]), None);
    }

    #[test]
    fn cells_serialize_to_plain_json_values() {
        assert_eq!(json!(Cell::Null), json!(null));
        assert_eq!(json!(Cell::Integer(3)), json!(3));
        assert_eq!(json!(Cell::Real(2.5)), json!(2.5));
        assert_eq!(json!(Cell::Text("btc".to_string())), json!("btc"));
    }
}
