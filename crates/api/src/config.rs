use shelfshare_core::sweep::{clamp_batch_size, DEFAULT_SWEEP_BATCH_SIZE, DEFAULT_SWEEP_INTERVAL_SECS};

use crate::auth::jwt::JwtConfig;
use crate::retry::DEFAULT_STORE_RETRY_ATTEMPTS;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background tasks, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT validation settings for tokens issued by the user directory.
    pub jwt: JwtConfig,
    /// Hold expiry sweep cadence.
    pub sweep: SweepConfig,
    /// Attempts for idempotent store reads before surfacing 503 (default: `3`).
    pub store_retry_attempts: u32,
}

/// Settings for the background hold expiry sweeper.
#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    /// Seconds between sweeps (default: `60`).
    pub interval_secs: u64,
    /// Page size of the expired-hold scan (default: `100`).
    pub batch_size: i64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            batch_size: DEFAULT_SWEEP_BATCH_SIZE,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`    | `30`                       |
    /// | `HOLD_SWEEP_INTERVAL_SECS` | `60`                       |
    /// | `HOLD_SWEEP_BATCH_SIZE`    | `100`                      |
    /// | `STORE_RETRY_ATTEMPTS`     | `3`                        |
    ///
    /// `JWT_SECRET` is required; see [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let interval_secs: u64 = std::env::var("HOLD_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_SWEEP_INTERVAL_SECS.to_string())
            .parse()
            .expect("HOLD_SWEEP_INTERVAL_SECS must be a valid u64");
        assert!(interval_secs > 0, "HOLD_SWEEP_INTERVAL_SECS must be positive");

        let batch_size: i64 = std::env::var("HOLD_SWEEP_BATCH_SIZE")
            .unwrap_or_else(|_| DEFAULT_SWEEP_BATCH_SIZE.to_string())
            .parse()
            .expect("HOLD_SWEEP_BATCH_SIZE must be a valid i64");

        let store_retry_attempts: u32 = std::env::var("STORE_RETRY_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_STORE_RETRY_ATTEMPTS.to_string())
            .parse()
            .expect("STORE_RETRY_ATTEMPTS must be a valid u32");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            sweep: SweepConfig {
                interval_secs,
                batch_size: clamp_batch_size(batch_size),
            },
            store_retry_attempts: store_retry_attempts.max(1),
        }
    }
}
