use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use std::path::Path;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Open a pooled read handle over the market database.
///
/// The hub never writes: connections are read-only and the ingestion job
/// stays the sole owner of the file. Returns `None` when the file does not
/// exist yet; callers report the DB as unavailable until it appears.
pub fn open_ro_pool(path: &Path, max_size: u32) -> Option<DbPool> {
    if !path.exists() {
        tracing::warn!("market DB missing, deferring open: {}", path.display());
        return None;
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
        | OpenFlags::SQLITE_OPEN_URI;
    let manager = SqliteConnectionManager::file(path).with_flags(flags);

    match Pool::builder().max_size(max_size).build(manager) {
        Ok(pool) => Some(pool),
        Err(e) => {
            tracing::error!("failed to build pool over {}: {e}", path.display());
            None
        }
    }
}
