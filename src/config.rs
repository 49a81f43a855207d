use std::{str::FromStr, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
}

impl ServerConfig {
    /// Upper bound for reading a request and producing its response.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs + self.write_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Takes precedence over the discrete connection fields when set.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub sslmode: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return url.parse().context("parse DATABASE_URL");
        }
        let ssl_mode = PgSslMode::from_str(&self.sslmode)
            .with_context(|| format!("invalid DB_SSLMODE {:?}", self.sslmode))?;
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(ssl_mode))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

/// Cache connection settings. Parsed for deployment parity; nothing in the
/// auth flow talks to the cache.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
    pub db: i64,
}

impl RedisConfig {
    pub fn address(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.db)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub redis: RedisConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server = ServerConfig {
            host: text("APP_HOST", "0.0.0.0"),
            port: parsed(&lookup, "APP_PORT", 8080)?,
            read_timeout_secs: parsed(&lookup, "SERVER_READ_TIMEOUT_SECS", 10)?,
            write_timeout_secs: parsed(&lookup, "SERVER_WRITE_TIMEOUT_SECS", 10)?,
        };

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").filter(|v| !v.is_empty()),
            host: text("DB_HOST", "localhost"),
            port: parsed(&lookup, "DB_PORT", 5432)?,
            user: text("DB_USER", "postgres"),
            password: text("DB_PASSWORD", "postgres"),
            name: text("DB_NAME", "unidate"),
            sslmode: text("DB_SSLMODE", "disable"),
            max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", 10)?,
        };

        let jwt = JwtConfig {
            secret: lookup("JWT_SECRET")
                .filter(|v| !v.is_empty())
                .context("JWT_SECRET must be set")?,
            ttl_minutes: parsed(&lookup, "JWT_TTL_MINUTES", 60 * 24 * 7)?,
        };

        let redis = RedisConfig {
            host: text("REDIS_HOST", "localhost"),
            port: parsed(&lookup, "REDIS_PORT", 6379)?,
            password: text("REDIS_PASSWORD", ""),
            db: parsed(&lookup, "REDIS_DB", 0)?,
        };

        Ok(Self {
            server,
            database,
            jwt,
            redis,
        })
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let cfg = config_from(&[("JWT_SECRET", "s3cret")]).expect("config");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.request_timeout(), Duration::from_secs(20));
        assert_eq!(cfg.database.url, None);
        assert_eq!(cfg.database.name, "unidate");
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.jwt.ttl_minutes, 10_080);
        assert_eq!(cfg.redis.address(), "localhost:6379/0");
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn invalid_number_is_an_error() {
        let err = config_from(&[("JWT_SECRET", "x"), ("APP_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("APP_PORT"));
    }

    #[test]
    fn overrides_are_read() {
        let cfg = config_from(&[
            ("JWT_SECRET", "x"),
            ("APP_PORT", "9000"),
            ("JWT_TTL_MINUTES", "15"),
            ("DATABASE_URL", "postgres://u:p@db:5433/app"),
            ("REDIS_DB", "3"),
        ])
        .expect("config");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.jwt.ttl_minutes, 15);
        assert_eq!(cfg.redis.db, 3);
        let opts = cfg.database.connect_options().expect("options");
        assert_eq!(opts.get_host(), "db");
        assert_eq!(opts.get_port(), 5433);
    }

    #[test]
    fn discrete_database_fields_build_options() {
        let cfg = config_from(&[("JWT_SECRET", "x"), ("DB_HOST", "pg"), ("DB_NAME", "dating")])
            .expect("config");
        let opts = cfg.database.connect_options().expect("options");
        assert_eq!(opts.get_host(), "pg");
        assert_eq!(opts.get_database(), Some("dating"));
    }

    #[test]
    fn bad_sslmode_is_rejected() {
        let cfg = config_from(&[("JWT_SECRET", "x"), ("DB_SSLMODE", "sometimes")]).expect("config");
        assert!(cfg.database.connect_options().is_err());
    }
}
