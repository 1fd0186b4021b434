//! Runtime configuration for the auth core.
//!
//! All four values are required at process start; a missing or malformed
//! value is a fatal startup error, never a per-request one.

use chrono::Duration;
use thiserror::Error;

const JWT_SECRET: &str = "JWT_SECRET";
const REFRESH_SECRET: &str = "REFRESH_SECRET";
const ACCESS_TOKEN_EXPIRY: &str = "ACCESS_TOKEN_EXPIRY";
const REFRESH_TOKEN_EXPIRY: &str = "REFRESH_TOKEN_EXPIRY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Secrets and TTLs for the two token families.
#[derive(Clone)]
pub struct AuthConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl AuthConfig {
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl: Duration::seconds(access_ttl_secs),
            refresh_ttl: Duration::seconds(refresh_ttl_secs),
        }
    }

    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary lookup (testable seam).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let access_secret = require(&lookup, JWT_SECRET)?;
        let refresh_secret = require(&lookup, REFRESH_SECRET)?;
        let access_ttl_secs = require_secs(&lookup, ACCESS_TOKEN_EXPIRY)?;
        let refresh_ttl_secs = require_secs(&lookup, REFRESH_TOKEN_EXPIRY)?;

        Ok(Self::new(
            access_secret,
            refresh_secret,
            access_ttl_secs,
            refresh_ttl_secs,
        ))
    }
}

impl core::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Secrets stay out of logs.
        f.debug_struct("AuthConfig")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

fn require<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn require_secs<F>(lookup: &F, key: &'static str) -> Result<i64, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let raw = require(lookup, key)?;
    let secs: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(key, raw.clone()))?;
    if secs <= 0 {
        return Err(ConfigError::Invalid(key, raw));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(entries: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        entries.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn full_environment_parses() {
        let env = vars(&[
            (JWT_SECRET, "a"),
            (REFRESH_SECRET, "r"),
            (ACCESS_TOKEN_EXPIRY, "900"),
            (REFRESH_TOKEN_EXPIRY, "604800"),
        ]);

        let config = AuthConfig::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.access_ttl, Duration::seconds(900));
        assert_eq!(config.refresh_ttl, Duration::seconds(604_800));
    }

    #[test]
    fn each_missing_variable_is_fatal() {
        let keys = [
            JWT_SECRET,
            REFRESH_SECRET,
            ACCESS_TOKEN_EXPIRY,
            REFRESH_TOKEN_EXPIRY,
        ];

        for missing in keys {
            let env: HashMap<&'static str, String> = keys
                .iter()
                .filter(|k| **k != missing)
                .map(|k| (*k, "900".to_string()))
                .collect();

            let result = AuthConfig::from_lookup(|k| env.get(k).cloned());
            assert_eq!(result.unwrap_err(), ConfigError::Missing(missing));
        }
    }

    #[test]
    fn non_numeric_ttl_is_rejected() {
        let env = vars(&[
            (JWT_SECRET, "a"),
            (REFRESH_SECRET, "r"),
            (ACCESS_TOKEN_EXPIRY, "fifteen minutes"),
            (REFRESH_TOKEN_EXPIRY, "604800"),
        ]);

        let result = AuthConfig::from_lookup(|k| env.get(k).cloned());
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(ACCESS_TOKEN_EXPIRY, _))
        ));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = AuthConfig::new("top-secret", "other-secret", 900, 900);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("other-secret"));
    }
}
