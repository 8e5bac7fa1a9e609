//! Runtime configuration, read from the environment.

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::feed::RetryPolicy;

pub const DEFAULT_FEED_URL: &str = "https://dummyjson.com/products?limit=0";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// What a category query matching zero products returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyCategoryPolicy {
    /// Fail with NotFound, same as a missing id.
    #[default]
    NotFound,
    /// Succeed with an empty list.
    EmptyList,
}

impl FromStr for EmptyCategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not_found" | "notfound" => Ok(Self::NotFound),
            "empty" | "empty_list" => Ok(Self::EmptyList),
            other => Err(format!("unknown empty category policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub feed_url: String,
    pub retry: RetryPolicy,
    pub empty_category: EmptyCategoryPolicy,
    /// Postgres stores when set, in-memory stores otherwise.
    pub database_url: Option<String>,
    pub bind_addr: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            retry: RetryPolicy::default(),
            empty_category: EmptyCategoryPolicy::default(),
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_attempts = parse_or("FEED_MAX_ATTEMPTS", non_empty("FEED_MAX_ATTEMPTS"), defaults.retry.max_attempts);
        let timeout_secs = parse_or(
            "FEED_TIMEOUT_SECS",
            non_empty("FEED_TIMEOUT_SECS"),
            defaults.retry.timeout.as_secs(),
        );

        Self {
            feed_url: non_empty("PRODUCTS_LOAD_URL").unwrap_or(defaults.feed_url),
            retry: RetryPolicy::new(max_attempts, Duration::from_secs(timeout_secs)),
            empty_category: parse_or(
                "EMPTY_CATEGORY_POLICY",
                non_empty("EMPTY_CATEGORY_POLICY"),
                defaults.empty_category,
            ),
            database_url: non_empty("DATABASE_URL"),
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + core::fmt::Debug,
    T::Err: core::fmt::Display,
{
    match raw {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                warn!(key, value = %raw, error = %e, default = ?default, "invalid config value, using default");
                default
            }
        },
    }
}
