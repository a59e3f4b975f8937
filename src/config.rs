use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Only the poll cadences are tunable; respawn durations, the gold sample
/// period, request timeouts and the reconnect backoff are fixed by design.
#[derive(Debug, Clone)]
pub struct Config {
    /// League client install directory containing the lockfile
    pub league_path: String,

    /// Interval in milliseconds for the LCU polling fallback
    pub lcu_poll_interval_ms: u64,

    /// Interval in milliseconds for the live game data poller
    pub live_poll_interval_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            league_path: env::var("LEAGUE_PATH")
                .unwrap_or_else(|_| r"C:\Riot Games\League of Legends".to_string()),

            lcu_poll_interval_ms: env::var("LCU_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .context("LCU_POLL_INTERVAL_MS must be a valid number")?,

            live_poll_interval_ms: env::var("LIVE_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .context("LIVE_POLL_INTERVAL_MS must be a valid number")?,
        })
    }
}
