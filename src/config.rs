use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_FEED_URL: &str = "https://www.raywenderlich.com/feed/podcast";
pub const DEFAULT_BRAND_ICON: &str =
    "https://koenig-media.raywenderlich.com/uploads/2016/02/Logo.png";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub feed_url: String,
    pub brand_icon_url: String,
    pub fetch_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            feed_url: DEFAULT_FEED_URL.to_string(),
            brand_icon_url: DEFAULT_BRAND_ICON.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or blank variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Config::default();

        if let Some(v) = get("FEED_URL") {
            cfg.feed_url = absolute_url("FEED_URL", v)?;
        }
        if let Some(v) = get("BRAND_ICON_URL") {
            cfg.brand_icon_url = absolute_url("BRAND_ICON_URL", v)?;
        }
        if let Some(v) = get("FETCH_TIMEOUT_SECS") {
            let secs = v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| invalid("FETCH_TIMEOUT_SECS", format!("'{}' is not a positive integer", v)))?;
            cfg.fetch_timeout = Duration::from_secs(secs);
        }
        Ok(cfg)
    }
}

fn absolute_url(key: &str, v: String) -> Result<String, ConfigError> {
    let v = v.trim().to_string();
    url::Url::parse(&v).map_err(|e| invalid(key, format!("'{}': {}", v, e)))?;
    Ok(v)
}

fn invalid(key: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason,
    }
}
