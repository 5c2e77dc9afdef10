use std::net::{IpAddr, SocketAddr};

use anyhow::Context;

use crate::search::filter::AggregationPolicy;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: IpAddr,
    pub server_port: u16,
    pub environment: Environment,
    pub log_level: String,
    pub frontend_url: String,
    pub search: SearchConfig,
}

/// Deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Tunables for the review search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Upper bound for the `limit` query parameter.
    pub max_page_size: u64,
    /// Let games with no ratings on an axis through that axis's bounds.
    pub skip_filter_when_unrated: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_page_size: 100,
            skip_filter_when_unrated: true,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub const fn policy(&self) -> AggregationPolicy {
        AggregationPolicy {
            skip_filter_when_unrated: self.skip_filter_when_unrated,
        }
    }

    fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let max_page_size = match std::env::var("SEARCH_MAX_PAGE_SIZE") {
            Ok(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|size| *size > 0)
                .context("SEARCH_MAX_PAGE_SIZE must be a positive integer")?,
            Err(_) => defaults.max_page_size,
        };

        let skip_filter_when_unrated = match std::env::var("SEARCH_SKIP_FILTER_WHEN_UNRATED") {
            Ok(raw) => parse_flag(&raw)
                .context("SEARCH_SKIP_FILTER_WHEN_UNRATED must be true or false")?,
            Err(_) => defaults.skip_filter_when_unrated,
        };

        Ok(Self {
            max_page_size,
            skip_filter_when_unrated,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `DATABASE_URL`
    /// Optional with defaults: `SERVER_HOST`, `SERVER_PORT`, `ENVIRONMENT`, `LOG_LEVEL`,
    /// `FRONTEND_URL`, `SEARCH_MAX_PAGE_SIZE`, `SEARCH_SKIP_FILTER_WHEN_UNRATED`
    ///
    /// `PORT` overrides `SERVER_PORT` and host defaults to `0.0.0.0` in production.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is not set, or if any optional variable
    /// holds an invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let environment = match std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        let server_port = std::env::var("PORT")
            .or_else(|_| std::env::var("SERVER_PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT / PORT must be a valid u16")?;

        let default_host = if environment == Environment::Production {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let server_host = std::env::var("SERVER_HOST")
            .unwrap_or_else(|_| default_host.to_string())
            .parse::<IpAddr>()
            .context("SERVER_HOST must be a valid IP address")?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:3001".to_string());

        Ok(Self {
            database_url,
            server_host,
            server_port,
            environment,
            log_level,
            frontend_url,
            search: SearchConfig::from_env()?,
        })
    }

    /// Build the socket address for the server to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = Config {
            database_url: String::new(),
            server_host: IpAddr::from([127, 0, 0, 1]),
            server_port: 3000,
            environment: Environment::Development,
            log_level: "info".to_string(),
            frontend_url: String::new(),
            search: SearchConfig::default(),
        };
        let addr = config.socket_addr();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn search_defaults() {
        let search = SearchConfig::default();
        assert_eq!(search.max_page_size, 100);
        assert!(search.policy().skip_filter_when_unrated);
    }

    #[test]
    fn flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
