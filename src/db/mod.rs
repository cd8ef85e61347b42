pub mod coins;
pub mod pool;
pub mod schema;
pub mod table;
