use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use hangman_core::CategoryPolicy;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub default_hints_allowed: u32,
    pub max_hints_allowed: u32,
    pub default_category: String,
    pub category_policy: CategoryPolicy,
    pub words_directory: Option<PathBuf>,
    pub session_timeout_minutes: u64,
    pub room_timeout_minutes: u64,
    pub rate_limit_burst: u32,
    pub rate_limit_refill_ms: u64,
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            default_hints_allowed: parse_or(&lookup, "DEFAULT_HINTS_ALLOWED", 2)?,
            max_hints_allowed: parse_or(&lookup, "MAX_HINTS_ALLOWED", 5)?,
            default_category: lookup("DEFAULT_CATEGORY")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| "general".to_string()),
            category_policy: parse_or(&lookup, "CATEGORY_POLICY", CategoryPolicy::default())?,
            words_directory: lookup("WORDS_DIRECTORY")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            session_timeout_minutes: parse_or(&lookup, "SESSION_TIMEOUT_MINUTES", 120)?,
            room_timeout_minutes: parse_or(&lookup, "ROOM_TIMEOUT_MINUTES", 60)?,
            rate_limit_burst: parse_or(&lookup, "RATE_LIMIT_BURST", 30)?,
            rate_limit_refill_ms: parse_or(&lookup, "RATE_LIMIT_REFILL_MS", 500)?,
            database_url: lookup("DATABASE_URL").filter(|value| !value.trim().is_empty()),
        };

        if config.default_hints_allowed > config.max_hints_allowed {
            return Err(ConfigError::InvalidValue {
                key: "DEFAULT_HINTS_ALLOWED",
                value: config.default_hints_allowed.to_string(),
                reason: format!("exceeds MAX_HINTS_ALLOWED ({})", config.max_hints_allowed),
            });
        }
        if config.rate_limit_refill_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "RATE_LIMIT_REFILL_MS",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(config)
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_minutes * 60)
    }

    pub fn room_timeout(&self) -> Duration {
        Duration::from_secs(self.room_timeout_minutes * 60)
    }

    pub fn rate_limit_refill(&self) -> Duration {
        Duration::from_millis(self.rate_limit_refill_ms)
    }

    /// Hints for a new game: the requested count capped at the maximum.
    pub fn hints_for(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_hints_allowed)
            .min(self.max_hints_allowed)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            default_hints_allowed: 2,
            max_hints_allowed: 5,
            default_category: "general".to_string(),
            category_policy: CategoryPolicy::default(),
            words_directory: None,
            session_timeout_minutes: 120,
            room_timeout_minutes: 60,
            rate_limit_burst: 30,
            rate_limit_refill_ms: 500,
            database_url: None,
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|err: T::Err| ConfigError::InvalidValue {
            key,
            value,
            reason: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_hints_allowed, 2);
        assert_eq!(config.max_hints_allowed, 5);
        assert_eq!(config.default_category, "general");
        assert_eq!(config.category_policy, CategoryPolicy::FallbackToDefault);
        assert!(config.words_directory.is_none());
        assert!(config.database_url.is_none());
        assert_eq!(config.session_timeout(), Duration::from_secs(7200));
        assert_eq!(config.rate_limit_refill(), Duration::from_millis(500));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("CATEGORY_POLICY", "strict"),
            ("WORDS_DIRECTORY", "/srv/words"),
            ("DATABASE_URL", "sqlite://hangman.db?mode=rwc"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.category_policy, CategoryPolicy::Strict);
        assert_eq!(config.words_directory, Some(PathBuf::from("/srv/words")));
        assert_eq!(config.database_url.as_deref(), Some("sqlite://hangman.db?mode=rwc"));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));

        let err = config_from(&[("CATEGORY_POLICY", "lenient")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "CATEGORY_POLICY", .. }));

        let err = config_from(&[("DEFAULT_HINTS_ALLOWED", "9")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DEFAULT_HINTS_ALLOWED", .. }));

        assert!(config_from(&[("RATE_LIMIT_REFILL_MS", "0")]).is_err());
    }

    #[test]
    fn test_hints_are_capped() {
        let config = Config::default();
        assert_eq!(config.hints_for(None), 2);
        assert_eq!(config.hints_for(Some(0)), 0);
        assert_eq!(config.hints_for(Some(50)), 5);
    }
}
