//! Storefront configuration from the environment.

use shopfront_catalog::{DEFAULT_PAGE_SIZE, SortKey};
use shopfront_observability::LogFormat;
use thiserror::Error;

use crate::controller::FetchPolicy;

pub const ENV_API_URL: &str = "SHOPFRONT_API_URL";
pub const ENV_API_TOKEN: &str = "SHOPFRONT_API_TOKEN";
pub const ENV_PAGE_SIZE: &str = "SHOPFRONT_PAGE_SIZE";
pub const ENV_FETCH_POLICY: &str = "SHOPFRONT_FETCH_POLICY";
pub const ENV_SORT: &str = "SHOPFRONT_SORT";
pub const ENV_LOG_FORMAT: &str = "SHOPFRONT_LOG_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: `{value}` ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Base URL of the REST catalog backend. `None` serves the bundled demo catalog.
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub page_size: u32,
    pub fetch_policy: FetchPolicy,
    pub sort_key: SortKey,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            fetch_policy: FetchPolicy::default(),
            sort_key: SortKey::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.api_url = get(ENV_API_URL).map(|url| url.trim_end_matches('/').to_string());
        config.api_token = get(ENV_API_TOKEN);

        if let Some(raw) = get(ENV_PAGE_SIZE) {
            config.page_size = match raw.parse::<u32>() {
                Ok(0) => return Err(ConfigError::invalid(ENV_PAGE_SIZE, &raw, "must be positive")),
                Ok(n) => n,
                Err(e) => return Err(ConfigError::invalid(ENV_PAGE_SIZE, &raw, e.to_string())),
            };
        }

        if let Some(raw) = get(ENV_FETCH_POLICY) {
            config.fetch_policy = raw
                .parse()
                .map_err(|e: shopfront_core::DomainError| {
                    ConfigError::invalid(ENV_FETCH_POLICY, &raw, e.to_string())
                })?;
        }

        if let Some(raw) = get(ENV_SORT) {
            config.sort_key = raw
                .parse()
                .map_err(|e: shopfront_core::DomainError| ConfigError::invalid(ENV_SORT, &raw, e.to_string()))?;
        }

        if let Some(raw) = get(ENV_LOG_FORMAT) {
            config.log_format = raw
                .parse()
                .map_err(|e: String| ConfigError::invalid(ENV_LOG_FORMAT, &raw, e))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.page_size, 12);
        assert_eq!(config.fetch_policy, FetchPolicy::Rederive);
        assert_eq!(config.sort_key, SortKey::Newest);
    }

    #[test]
    fn reads_all_keys() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://shop.example.com/api/"),
            (ENV_API_TOKEN, "secret"),
            (ENV_PAGE_SIZE, "24"),
            (ENV_FETCH_POLICY, "refetch"),
            (ENV_SORT, "price-desc"),
            (ENV_LOG_FORMAT, "compact"),
        ]))
        .unwrap();

        assert_eq!(config.api_url.as_deref(), Some("https://shop.example.com/api"));
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.page_size, 24);
        assert_eq!(config.fetch_policy, FetchPolicy::Refetch);
        assert_eq!(config.sort_key, SortKey::PriceDescending);
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[(ENV_API_URL, "  "), (ENV_SORT, "")])).unwrap();
        assert_eq!(config.api_url, None);
        assert_eq!(config.sort_key, SortKey::Newest);
    }

    #[test]
    fn rejects_zero_or_garbage_page_size() {
        for raw in ["0", "twelve", "-3"] {
            let err = StorefrontConfig::from_lookup(lookup(&[(ENV_PAGE_SIZE, raw)])).unwrap_err();
            match err {
                ConfigError::Invalid { key, value, .. } => {
                    assert_eq!(key, ENV_PAGE_SIZE);
                    assert_eq!(value, raw);
                }
            }
        }
    }

    #[test]
    fn rejects_unknown_sort_and_policy() {
        assert!(StorefrontConfig::from_lookup(lookup(&[(ENV_SORT, "cheapest")])).is_err());
        assert!(StorefrontConfig::from_lookup(lookup(&[(ENV_FETCH_POLICY, "lazy")])).is_err());
        assert!(StorefrontConfig::from_lookup(lookup(&[(ENV_LOG_FORMAT, "xml")])).is_err());
    }
}
