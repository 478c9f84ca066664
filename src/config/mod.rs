//! Configuration module for the videos backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Whether to load the fixture videos at startup
    pub seed: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("VIDEOS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3003".to_string())
            .parse()?;

        let log_level = env::var("VIDEOS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let seed = env::var("VIDEOS_SEED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        Ok(Self {
            bind_addr,
            log_level,
            seed,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Single test so the process-wide env vars are not raced by a sibling
        env::remove_var("VIDEOS_BIND_ADDR");
        env::remove_var("VIDEOS_LOG_LEVEL");
        env::remove_var("VIDEOS_SEED");

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3003");
        assert_eq!(config.log_level, "info");
        assert!(config.seed);

        env::set_var("VIDEOS_SEED", "false");
        env::set_var("VIDEOS_BIND_ADDR", "0.0.0.0:9000");
        let config = Config::from_env().unwrap();
        assert!(!config.seed);
        assert_eq!(config.bind_addr.port(), 9000);

        env::set_var("VIDEOS_BIND_ADDR", "not-an-address");
        assert!(Config::from_env().is_err());

        env::remove_var("VIDEOS_BIND_ADDR");
        env::remove_var("VIDEOS_SEED");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag(" no "));
    }
}
