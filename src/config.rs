use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::error::SearchError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";
pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
    pub service_key: Option<String>,
    pub port: u16,
    pub http_timeout: Duration,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present
    pub fn load() -> Result<Self, SearchError> {
        if dotenvy::dotenv().is_ok() {
            info!("Loaded environment from .env");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL").unwrap_or_else(|| {
            info!("BACKEND_URL not set, using default: {DEFAULT_BACKEND_URL}");
            DEFAULT_BACKEND_URL.to_string()
        });

        let service_key = lookup("BACKEND_SERVICE_KEY").filter(|k| !k.trim().is_empty());
        if service_key.is_none() {
            warn!("BACKEND_SERVICE_KEY not set, query logs stay local");
        }

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            service_key,
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
            http_timeout: Duration::from_secs(try_load(
                &lookup,
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> Result<T, SearchError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| SearchError::Config {
            key: key.to_string(),
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.service_key, None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BACKEND_URL", "https://abc.example.co/"),
            ("BACKEND_SERVICE_KEY", "secret"),
            ("PORT", "9000"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.backend_url, "https://abc.example.co");
        assert_eq!(config.service_key.as_deref(), Some("secret"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_service_key_is_unset() {
        let config = Config::from_lookup(lookup_from(&[("BACKEND_SERVICE_KEY", "  ")])).unwrap();
        assert_eq!(config.service_key, None);
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, SearchError::Config { ref key, .. } if key == "PORT"));
    }
}
