use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_USER_AGENT: &str = "SEO-Tag-Analyzer/1.0";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Permissive CORS and human-readable logs unless `APP_ENV=production`.
    pub is_dev: bool,
    pub fetch_timeout: Duration,
    pub user_agent: String,
    /// Refuse to fetch URLs resolving to private, loopback or link-local hosts.
    pub block_private_hosts: bool,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            is_dev: true,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            block_private_hosts: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Read configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT", defaults.server_port)?,
            is_dev: env::var("APP_ENV").as_deref() != Ok("production"),
            fetch_timeout: Duration::from_secs(parse_var(
                "FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )?),
            user_agent: env::var("USER_AGENT")
                .ok()
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            block_private_hosts: parse_var("BLOCK_PRIVATE_HOSTS", defaults.block_private_hosts)?,
            max_body_bytes: parse_var("MAX_BODY_BYTES", defaults.max_body_bytes)?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "SERVER_HOST",
        "SERVER_PORT",
        "APP_ENV",
        "FETCH_TIMEOUT_SECS",
        "USER_AGENT",
        "BLOCK_PRIVATE_HOSTS",
        "MAX_BODY_BYTES",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn defaults_when_unset() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
        assert!(config.is_dev);
        assert_eq!(config.fetch_timeout, DEFAULT_FETCH_TIMEOUT);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.block_private_hosts);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear_env();
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("SERVER_PORT", "9000");
        env::set_var("APP_ENV", "production");
        env::set_var("FETCH_TIMEOUT_SECS", "3");
        env::set_var("USER_AGENT", "TestAgent/2.0");
        env::set_var("BLOCK_PRIVATE_HOSTS", "false");
        env::set_var("MAX_BODY_BYTES", "1024");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.server_addr(), "0.0.0.0:9000");
        assert!(!config.is_dev);
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "TestAgent/2.0");
        assert!(!config.block_private_hosts);
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    #[serial]
    fn rejects_unparseable_port() {
        clear_env();
        env::set_var("SERVER_PORT", "eighty");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(matches!(err, ConfigError::Invalid { var: "SERVER_PORT", .. }));
    }
}
