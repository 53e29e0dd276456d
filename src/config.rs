use std::{str::FromStr, time::Duration};

use anyhow::Context;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Maximum accepted request body, in bytes.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Overrides any `sslmode` carried by the URL when set.
    pub ssl_mode: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn ssl_mode(&self) -> anyhow::Result<Option<PgSslMode>> {
        self.ssl_mode
            .as_deref()
            .map(|raw| {
                raw.parse::<PgSslMode>()
                    .with_context(|| format!("invalid DATABASE_SSL_MODE `{raw}`"))
            })
            .transpose()
    }

    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        let options = PgConnectOptions::from_str(&self.url).context("parse DATABASE_URL")?;
        Ok(match self.ssl_mode()? {
            Some(mode) => options.ssl_mode(mode),
            None => options,
        })
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let database = DatabaseConfig {
            url,
            ssl_mode: lookup("DATABASE_SSL_MODE"),
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            acquire_timeout_secs: parse_or(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", 30)?,
        };
        // fail at startup rather than on first connect
        database.ssl_mode()?;

        Ok(Self {
            database,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "PORT", 3000)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: `{raw}`")),
        None => Ok(default),
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
    fn defaults_apply_when_only_database_url_is_set() {
        let cfg = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://u:p@localhost/db",
        )]))
        .expect("config");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.database.acquire_timeout(), Duration::from_secs(30));
        assert!(cfg.database.ssl_mode().unwrap().is_none());
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_port_and_ssl_mode() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://u:p@db/app"),
            ("PORT", "8081"),
            ("DATABASE_SSL_MODE", "require"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
        ]))
        .expect("config");
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.database.max_connections, 4);
        assert!(matches!(cfg.database.ssl_mode().unwrap(), Some(PgSslMode::Require)));
    }

    #[test]
    fn url_sslmode_survives_when_env_override_is_unset() {
        let cfg = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://u:p@db.example/app?sslmode=verify-full",
        )]))
        .expect("config");
        let options = cfg.database.connect_options().expect("options");
        assert!(matches!(options.get_ssl_mode(), PgSslMode::VerifyFull));
    }

    #[test]
    fn env_ssl_mode_overrides_url() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://u:p@db.example/app?sslmode=verify-full"),
            ("DATABASE_SSL_MODE", "require"),
        ]))
        .expect("config");
        let options = cfg.database.connect_options().expect("options");
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Require));
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn rejects_garbage_port() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn rejects_unknown_ssl_mode() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("DATABASE_SSL_MODE", "sometimes"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DATABASE_SSL_MODE"));
    }
}
