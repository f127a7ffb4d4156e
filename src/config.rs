//! Configuration Module
//!
//! Resolves the search cache settings from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Search cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether search results are cached at all
    pub cache_enabled: bool,
    /// Maximum number of cached search responses
    pub cache_size: usize,
    /// Lifetime of a cached response in seconds
    pub cache_ttl: u64,
    /// Interval in seconds between expired-entry sweeps
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SEARCH_CACHE_ENABLED` - Enable caching (default: true)
    /// - `SEARCH_CACHE_SIZE` - Maximum cached responses (default: 100)
    /// - `SEARCH_CACHE_TTL` - TTL in seconds (default: 300)
    /// - `SEARCH_CACHE_CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            cache_enabled: lookup("SEARCH_CACHE_ENABLED")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.cache_enabled),
            cache_size: lookup("SEARCH_CACHE_SIZE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.cache_size),
            cache_ttl: lookup("SEARCH_CACHE_TTL")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.cache_ttl),
            cleanup_interval: lookup("SEARCH_CACHE_CLEANUP_INTERVAL")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Checks that the cache settings can build a store.
    pub fn validate(&self) -> Result<()> {
        if self.cache_size == 0 {
            return Err(CacheError::InvalidCapacity);
        }
        if self.cache_ttl == 0 {
            return Err(CacheError::InvalidTtl);
        }
        if self.cleanup_interval == 0 {
            return Err(CacheError::InvalidConfig(
                "cleanup interval must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn cleanup_period(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_size: 100,
            cache_ttl: 300,
            cleanup_interval: 60,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.cache_enabled);
        assert_eq!(config.cache_size, 100);
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.ttl(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_lookup_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_lookup_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("SEARCH_CACHE_ENABLED", "off"),
            ("SEARCH_CACHE_SIZE", "25"),
            ("SEARCH_CACHE_TTL", " 30 "),
            ("SEARCH_CACHE_CLEANUP_INTERVAL", "5"),
        ]));

        assert!(!config.cache_enabled);
        assert_eq!(config.cache_size, 25);
        assert_eq!(config.cache_ttl, 30);
        assert_eq!(config.cleanup_period(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_unparseable_falls_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("SEARCH_CACHE_ENABLED", "maybe"),
            ("SEARCH_CACHE_SIZE", "-3"),
            ("SEARCH_CACHE_TTL", "soon"),
        ]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_validate_rejects_zero() {
        let zero_size = Config {
            cache_size: 0,
            ..Config::default()
        };
        assert_eq!(zero_size.validate(), Err(CacheError::InvalidCapacity));

        let zero_ttl = Config {
            cache_ttl: 0,
            ..Config::default()
        };
        assert_eq!(zero_ttl.validate(), Err(CacheError::InvalidTtl));

        let zero_interval = Config {
            cleanup_interval: 0,
            ..Config::default()
        };
        assert!(matches!(
            zero_interval.validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }
}
