//! Environment-driven configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `IPL_LOG_LEVEL` | `info` |
//! | `IPL_LOG_FORMAT` | `pretty` (`json` also accepted) |
//! | `IPL_LOG_TARGET` | `true` |
//! | `IPL_DASHBOARD_ADDR` | `127.0.0.1:8080` |
//!
//! Unparseable values fall back to the default instead of failing startup.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::observability::{LogFormat, LoggingConfig};

pub const DEFAULT_DASHBOARD_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub dashboard_addr: SocketAddr,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            dashboard_addr: DEFAULT_DASHBOARD_ADDR,
        }
    }
}

pub fn app_config_from_env() -> AppConfig {
    AppConfig {
        logging: logging_config_from_env(),
        dashboard_addr: env::var("IPL_DASHBOARD_ADDR")
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_DASHBOARD_ADDR),
    }
}

pub fn logging_config_from_env() -> LoggingConfig {
    let mut config = LoggingConfig::default();

    if let Ok(level) = env::var("IPL_LOG_LEVEL") {
        let trimmed = level.trim();
        if !trimmed.is_empty() {
            config.level = trimmed.to_string();
        }
    }

    if let Some(format) = env::var("IPL_LOG_FORMAT")
        .ok()
        .and_then(|raw| parse_log_format(&raw))
    {
        config.format = format;
    }

    if let Some(include_target) = env::var("IPL_LOG_TARGET")
        .ok()
        .and_then(|raw| parse_bool(&raw))
    {
        config.include_target = include_target;
    }

    config
}

fn parse_log_format(raw: &str) -> Option<LogFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Some(LogFormat::Json),
        "pretty" => Some(LogFormat::Pretty),
        _ => None,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
