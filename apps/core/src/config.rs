//! Assistant configuration.
//!
//! Defaults can be overridden through environment variables (optionally from
//! a `.env` file). The result is validated before use.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use validator::{Validate, ValidationError};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_thinking_window"))]
pub struct AssistantConfig {
    /// Shortest simulated "thinking" delay before a reply is committed.
    #[validate(range(max = 60000))]
    pub thinking_min_ms: u64,
    /// Longest simulated "thinking" delay.
    #[validate(range(max = 60000))]
    pub thinking_max_ms: u64,
    /// Delay before navigating to a topic page.
    #[validate(range(max = 60000))]
    pub topic_navigation_delay_ms: u64,
    /// Delay before an explicitly requested navigation.
    #[validate(range(max = 60000))]
    pub navigation_delay_ms: u64,
    /// Catalog items attached to a reply.
    #[validate(range(min = 1, max = 3))]
    pub max_suggestions: usize,
    /// Search results listed in the reply text.
    #[validate(range(min = 1, max = 20))]
    pub max_listed_results: usize,
    /// Page the session starts on.
    #[validate(length(min = 1))]
    pub initial_route: String,
    /// Catalog file; the built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Emit JSON (bunyan) logs instead of plain text.
    pub log_json: bool,
}

fn validate_thinking_window(config: &AssistantConfig) -> Result<(), ValidationError> {
    if config.thinking_min_ms > config.thinking_max_ms {
        return Err(ValidationError::new("thinking_window"));
    }
    Ok(())
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            thinking_min_ms: 1000,
            thinking_max_ms: 2500,
            topic_navigation_delay_ms: 2000,
            navigation_delay_ms: 1000,
            max_suggestions: 3,
            max_listed_results: 5,
            initial_route: "/".to_string(),
            catalog_path: None,
            log_json: false,
        }
    }
}

impl AssistantConfig {
    /// Loads `.env` (if any), applies `ASSISTANT_*` overrides and validates.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Some(v) = read_var("ASSISTANT_THINKING_MIN_MS")? {
            config.thinking_min_ms = v;
        }
        if let Some(v) = read_var("ASSISTANT_THINKING_MAX_MS")? {
            config.thinking_max_ms = v;
        }
        if let Some(v) = read_var("ASSISTANT_TOPIC_NAV_DELAY_MS")? {
            config.topic_navigation_delay_ms = v;
        }
        if let Some(v) = read_var("ASSISTANT_NAV_DELAY_MS")? {
            config.navigation_delay_ms = v;
        }
        if let Some(v) = read_var("ASSISTANT_MAX_SUGGESTIONS")? {
            config.max_suggestions = v;
        }
        if let Some(v) = read_var("ASSISTANT_MAX_LISTED_RESULTS")? {
            config.max_listed_results = v;
        }
        if let Some(v) = read_var::<String>("ASSISTANT_INITIAL_ROUTE")? {
            config.initial_route = v;
        }
        if let Some(v) = read_var::<PathBuf>("ASSISTANT_CATALOG_PATH")? {
            config.catalog_path = Some(v);
        }
        if let Some(v) = read_var("ASSISTANT_LOG_JSON")? {
            config.log_json = v;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn thinking_window(&self) -> RangeInclusive<Duration> {
        Duration::from_millis(self.thinking_min_ms)..=Duration::from_millis(self.thinking_max_ms)
    }
}

fn read_var<T>(key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{}={:?}: {}", key, raw, e))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::Config(format!("{}: {}", key, e))),
    }
}
