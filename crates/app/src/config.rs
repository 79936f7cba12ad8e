//! Runtime configuration, read from `STOCKROOM_*` environment variables.

use std::fmt;
use std::str::FromStr;

use stockroom_observability::LogFormat;

pub const SEED_DEMO_VAR: &str = "STOCKROOM_SEED_DEMO";
pub const TOP_PRODUCTS_VAR: &str = "STOCKROOM_TOP_PRODUCTS";
pub const LOG_FORMAT_VAR: &str = "STOCKROOM_LOG_FORMAT";
pub const OUTPUT_VAR: &str = "STOCKROOM_OUTPUT";

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: `{value}` ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl fmt::Display) -> Self {
        Self::InvalidValue {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// How the dashboard is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err("expected `text` or `json`".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Start from the demo catalog instead of an empty store.
    pub seed_demo: bool,
    /// Rows in the "top products by value" table.
    pub top_products: usize,
    pub log_format: LogFormat,
    pub output: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_demo: true,
            top_products: 5,
            log_format: LogFormat::Json,
            output: OutputFormat::Text,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. Unset or blank keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let seed_demo = match get(SEED_DEMO_VAR) {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid(SEED_DEMO_VAR, &raw, "expected a boolean"))?,
            None => defaults.seed_demo,
        };

        let top_products = match get(TOP_PRODUCTS_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::invalid(TOP_PRODUCTS_VAR, &raw, e))?,
            None => defaults.top_products,
        };

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT_VAR, &raw, e))?,
            None => defaults.log_format,
        };

        let output = match get(OUTPUT_VAR) {
            Some(raw) => raw
                .parse::<OutputFormat>()
                .map_err(|e| ConfigError::invalid(OUTPUT_VAR, &raw, e))?,
            None => defaults.output,
        };

        Ok(Self {
            seed_demo,
            top_products,
            log_format,
            output,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.seed_demo);
        assert_eq!(config.top_products, 5);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn every_variable_is_read() {
        let config = AppConfig::from_lookup(lookup(&[
            (SEED_DEMO_VAR, "no"),
            (TOP_PRODUCTS_VAR, " 3 "),
            (LOG_FORMAT_VAR, "pretty"),
            (OUTPUT_VAR, "JSON"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            AppConfig {
                seed_demo: false,
                top_products: 3,
                log_format: LogFormat::Pretty,
                output: OutputFormat::Json,
            }
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup(&[(TOP_PRODUCTS_VAR, "  ")])).unwrap();
        assert_eq!(config.top_products, 5);
    }

    #[test]
    fn bad_values_name_the_variable() {
        let err = AppConfig::from_lookup(lookup(&[(TOP_PRODUCTS_VAR, "many")])).unwrap_err();
        let ConfigError::InvalidValue { var, value, .. } = &err;
        assert_eq!(*var, TOP_PRODUCTS_VAR);
        assert_eq!(value, "many");
        assert!(err.to_string().contains("STOCKROOM_TOP_PRODUCTS"));

        assert!(AppConfig::from_lookup(lookup(&[(SEED_DEMO_VAR, "maybe")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[(OUTPUT_VAR, "html")])).is_err());
    }
}
