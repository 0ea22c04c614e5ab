//! Application Configuration
//!
//! Values are baked in at compile time (`FOURQ_API_URL`, `FOURQ_LOG_LEVEL`),
//! the usual arrangement for a static WASM bundle.

use std::str::FromStr;

use tracing::Level;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_LOG_CAPACITY: usize = rolling_logger::DEFAULT_CAPACITY;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the ticket/auth API, without trailing slash
    pub api_base_url: String,
    pub log_level: Level,
    /// Entries kept by the in-memory log buffer
    pub log_capacity: usize,
}

impl AppConfig {
    pub fn new(api_base_url: &str, log_level: Level) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            log_level,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }

    /// Build from compile-time environment, falling back to defaults
    pub fn from_env() -> Self {
        let base = option_env!("FOURQ_API_URL").unwrap_or(DEFAULT_API_URL);
        let level = option_env!("FOURQ_LOG_LEVEL")
            .and_then(|raw| Level::from_str(raw).ok())
            .unwrap_or(Level::INFO);
        Self::new(base, level)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, Level::INFO)
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = AppConfig::new("https://api.example.com/", Level::DEBUG);
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_blank_url_falls_back() {
        let config = AppConfig::new("  ", Level::INFO);
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.log_capacity, rolling_logger::DEFAULT_CAPACITY);
    }
}
