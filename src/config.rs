use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::Level;

use crate::client::DEFAULT_API_BASE_URL;
use crate::rule::DEFAULT_LOOKAHEAD_MONTHS;
use crate::types::Config;

pub const DEFAULT_CATALOGUE_FILE: &str = "catalogue.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Maps LOG_LEVEL to a tracing level. Unknown values fall back to info.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    // An empty webhook means alerts are only logged.
    let slack_webhook_url = env
        .get_var("SLACK_WEBHOOK_URL")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let catalogue_file = env
        .get_var("CATALOGUE_FILE")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CATALOGUE_FILE.to_string());

    let log_level = parse_log_level(&env.get_var("LOG_LEVEL").unwrap_or_default());

    let api_base_url = env
        .get_var("EOL_API_BASE_URL")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let lookahead_months: u32 = env
        .get_var("EOL_LOOKAHEAD_MONTHS")
        .unwrap_or_else(|| DEFAULT_LOOKAHEAD_MONTHS.to_string())
        .trim()
        .parse()
        .context("Invalid EOL_LOOKAHEAD_MONTHS")?;

    let request_timeout_secs: u64 = env
        .get_var("REQUEST_TIMEOUT_SECS")
        .unwrap_or_else(|| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
        .parse()
        .ok()
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

    Ok(Config {
        slack_webhook_url,
        catalogue_file: PathBuf::from(catalogue_file),
        log_level,
        api_base_url,
        lookahead_months,
        request_timeout_secs,
    })
}
