//! Stockroom application layer: configuration, display formatting, and the
//! dashboard report the `stockroom` binary prints.

pub mod config;
pub mod dashboard;
pub mod format;

pub use config::{AppConfig, ConfigError, OutputFormat};
pub use dashboard::{Dashboard, render_json, render_text};
pub use format::{format_currency, format_date};
