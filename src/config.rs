use std::env;
use std::path::PathBuf;

/// Hub configuration derived from environment variables.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub bind: String,
    pub port: u16,

    /// SQLite file holding the four market tables, produced by the
    /// external ingestion job.
    pub db_path: PathBuf,
    pub pool_size: u32,

    /// How many coins (by market-cap rank) the trend selector offers.
    pub top_coins: u32,

    /// Frontend build output served for unmatched paths.
    pub frontend_dir: PathBuf,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_path(name: &str, default: &str) -> PathBuf {
    PathBuf::from(env_str(name, default))
}

impl HubConfig {
    pub fn from_env() -> Self {
        Self {
            bind: env_str("CM_HUB_BIND", "127.0.0.1"),
            port: env_u16("CM_HUB_PORT", 8600),
            db_path: env_path("CM_HUB_DB", "cross_market.db"),
            pool_size: env_u32("CM_HUB_POOL_SIZE", 4),
            top_coins: env_u32("CM_HUB_TOP_COINS", 3),
            frontend_dir: env_path("CM_HUB_FRONTEND_DIR", "frontend/dist"),
        }
    }
}
