use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .context("JWT_SECRET is not set")?;
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("APP_PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_ttl_hours = lookup("JWT_TTL_HOURS")
            .and_then(|h| h.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(24);
        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|c| c.parse::<u32>().ok())
            .filter(|c| *c > 0)
            .unwrap_or(10);
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            jwt_ttl_hours,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_keys_missing() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/rosie"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.jwt_ttl_hours, 24);
        assert_eq!(config.max_connections, 10);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/rosie"),
            ("JWT_SECRET", "s3cret"),
            ("APP_PORT", "not-a-port"),
            ("JWT_TTL_HOURS", "-4"),
            ("DB_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.jwt_ttl_hours, 24);
        assert_eq!(config.max_connections, 10);
    }

    #[test]
    fn missing_secret_is_an_error() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/rosie"),
            ("JWT_SECRET", "  "),
        ]));
        assert!(result.is_err());
    }
}
