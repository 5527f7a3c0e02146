//! Board configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | API_BASE_URL | (required) | Base URL of the order API |
//! | ACCESS_TOKEN | unset | Bearer token sent with every request |
//! | REQUEST_TIMEOUT_SECS | 30 | Per-request timeout |
//! | REFRESH_INTERVAL_SECS | 15 | Delay between board refreshes |
//! | ORDER_WINDOW_HOURS | unset | Look back this many hours (1 to 8784) instead of the local day |
//! | LOG_LEVEL | info | Log level |
//! | LOG_DIR | unset | Directory for daily rolling log files |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::board::{MAX_WINDOW_HOURS, TimeWindow};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub api_base_url: String,
    pub access_token: Option<String>,
    pub request_timeout_secs: u64,
    pub refresh_interval_secs: u64,
    /// `None` = orders of the current local day
    pub order_window_hours: Option<i64>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl BoardConfig {
    /// Defaults pointed at `api_base_url`
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            access_token: None,
            request_timeout_secs: 30,
            refresh_interval_secs: 15,
            order_window_hours: None,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }

    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let api_base_url =
            env::var("API_BASE_URL").map_err(|_| ConfigError::MissingEnv("API_BASE_URL"))?;
        let mut config = Self::new(api_base_url);

        config.access_token = env::var("ACCESS_TOKEN").ok().filter(|t| !t.is_empty());
        if let Some(secs) = parse_var("REQUEST_TIMEOUT_SECS")? {
            config.request_timeout_secs = secs;
        }
        if let Some(secs) = parse_var("REFRESH_INTERVAL_SECS")? {
            config.refresh_interval_secs = secs;
        }
        config.order_window_hours = parse_var("ORDER_WINDOW_HOURS")?
            .map(validate_window_hours)
            .transpose()?;
        if let Ok(level) = env::var("LOG_LEVEL") {
            config.log_level = level;
        }
        config.log_dir = env::var("LOG_DIR").ok();

        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    pub fn with_refresh_interval(mut self, seconds: u64) -> Self {
        self.refresh_interval_secs = seconds;
        self
    }

    pub fn with_window_hours(mut self, hours: i64) -> Self {
        self.order_window_hours = Some(hours);
        self
    }

    /// Per-request timeout; zero would fail every request immediately
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn time_window(&self) -> TimeWindow {
        match self.order_window_hours {
            Some(hours) => TimeWindow::LastHours(hours),
            None => TimeWindow::Today,
        }
    }
}

fn validate_window_hours(hours: i64) -> Result<i64, ConfigError> {
    if (1..=MAX_WINDOW_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(ConfigError::InvalidValue("ORDER_WINDOW_HOURS"))
    }
}

fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name)),
        Err(_) => Ok(None),
    }
}
