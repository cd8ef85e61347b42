/// DDL for the four tables the read path depends on.
///
/// The exact table and column names are the contract with the external
/// ingestion job; the hub never creates or migrates them in production.
/// The DDL here seeds fixture databases in tests.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS cryptocurrencies (
    id TEXT NOT NULL PRIMARY KEY,
    name TEXT NOT NULL,
    market_cap REAL,
    market_cap_rank INTEGER
);

CREATE TABLE IF NOT EXISTS crypto_prices (
    coin_id TEXT NOT NULL,
    date TEXT NOT NULL,
    price_usd REAL,
    PRIMARY KEY (coin_id, date)
);

CREATE TABLE IF NOT EXISTS oil_prices (
    date TEXT NOT NULL PRIMARY KEY,
    price_usd REAL
);

CREATE TABLE IF NOT EXISTS stock_prices (
    ticker TEXT NOT NULL,
    date TEXT NOT NULL,
    close REAL,
    PRIMARY KEY (ticker, date)
);
"#;
