use std::{env, fmt::Display, net::SocketAddr, str::FromStr};

use tracing::info;

use crate::error::ConfigError;

pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// How many recent records the listing keeps in memory
    pub record_limit: usize,
    /// Forward interpretations here instead of applying the local rules
    pub upstream_url: Option<String>,
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: try_load(&lookup, "FEEDBACK_BIND_ADDR", "127.0.0.1:3000")?,
            record_limit: try_load(&lookup, "FEEDBACK_RECORD_LIMIT", "100")?,
            upstream_url: lookup("FEEDBACK_UPSTREAM_URL").filter(|url| !url.trim().is_empty()),
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.clone(),
        reason: e.to_string(),
    })
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
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.record_limit, 100);
        assert!(config.upstream_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("FEEDBACK_BIND_ADDR", "0.0.0.0:8000"),
            ("FEEDBACK_RECORD_LIMIT", " 5 "),
            ("FEEDBACK_UPSTREAM_URL", "http://upstream:8000/api/interpret"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.record_limit, 5);
        assert_eq!(
            config.upstream_url.as_deref(),
            Some("http://upstream:8000/api/interpret")
        );
    }

    #[test]
    fn test_blank_upstream_is_unset() {
        let config =
            ServerConfig::from_lookup(lookup(&[("FEEDBACK_UPSTREAM_URL", "  ")])).unwrap();
        assert!(config.upstream_url.is_none());
    }

    #[test]
    fn test_invalid_value() {
        let result = ServerConfig::from_lookup(lookup(&[("FEEDBACK_RECORD_LIMIT", "lots")]));
        match result {
            Err(ConfigError::Invalid { key, value, .. }) => {
                assert_eq!(key, "FEEDBACK_RECORD_LIMIT");
                assert_eq!(value, "lots");
            }
            Ok(_) => panic!("Expected invalid config"),
        }
    }
}
