//! Configuration module

use std::env;

use crate::logic::whatif::store::DEFAULT_IDLE_TTL_MINUTES;
use crate::predictor::PredictorConfig;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Classification service base URL
    pub predictor_url: String,

    /// Bearer token for the classification service
    pub predictor_token: Option<String>,

    /// Request timeout against the classification service
    pub predictor_timeout_secs: u64,

    /// Idle what-if sessions are evicted after this many minutes
    pub session_ttl_minutes: i64,

    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            predictor_url: env::var("PREDICTOR_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api".to_string()),

            predictor_token: env::var("PREDICTOR_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),

            predictor_timeout_secs: env::var("PREDICTOR_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),

            session_ttl_minutes: env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|m| *m > 0)
                .unwrap_or(DEFAULT_IDLE_TTL_MINUTES),

            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes)
    }

    pub fn predictor_config(&self) -> PredictorConfig {
        PredictorConfig {
            base_url: self.predictor_url.clone(),
            token: self.predictor_token.clone(),
            timeout_seconds: self.predictor_timeout_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            predictor_url: "http://localhost:5000/api".to_string(),
            predictor_token: None,
            predictor_timeout_secs: 30,
            session_ttl_minutes: DEFAULT_IDLE_TTL_MINUTES,
            log_format: LogFormat::Pretty,
            environment: "development".to_string(),
        }
    }
}
