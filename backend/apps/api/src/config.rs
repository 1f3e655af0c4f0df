//! Server Configuration
//!
//! Read from the process environment (after `.env` is loaded). Malformed
//! values fail startup with the offending variable named.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::password::HashCost;

/// Deployment environment; selects the log format and level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Local,
    Dev,
    Prod,
}

impl FromStr for AppEnv {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => bail!("unknown environment {other:?} (expected local, dev or prod)"),
        }
    }
}

/// Everything the binary needs to start
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub env: AppEnv,
    pub database_url: String,
    pub http_addr: SocketAddr,
    pub token_ttl: Duration,
    pub request_timeout: Duration,
    pub store_timeout: Duration,
    pub db_max_connections: u32,
    pub hash_cost: HashCost,
    pub run_migrations: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = HashCost::default();

        Ok(Self {
            env: parse_or(&lookup, "APP_ENV", AppEnv::Local)?,
            database_url: database_url(&lookup)?,
            http_addr: parse_or(&lookup, "HTTP_ADDR", SocketAddr::from(([0, 0, 0, 0], 44044)))?,
            token_ttl: positive_secs(&lookup, "TOKEN_TTL_SECS", 3600)?,
            request_timeout: positive_secs(&lookup, "REQUEST_TIMEOUT_SECS", 10)?,
            store_timeout: positive_secs(&lookup, "STORE_TIMEOUT_SECS", 5)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            hash_cost: HashCost {
                memory_kib: parse_or(&lookup, "HASH_MEMORY_KIB", defaults.memory_kib)?,
                iterations: parse_or(&lookup, "HASH_ITERATIONS", defaults.iterations)?,
                parallelism: parse_or(&lookup, "HASH_PARALLELISM", defaults.parallelism)?,
            },
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::new(self.token_ttl, self.store_timeout)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("invalid {key}: {raw:?}")),
    }
}

/// A non-zero number of seconds
fn positive_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> anyhow::Result<Duration> {
    match parse_or(lookup, key, default)? {
        0 => bail!("{key} must be positive"),
        secs => Ok(Duration::from_secs(secs)),
    }
}

/// `DATABASE_URL`, or a DSN assembled from the `DB_*` parts
fn database_url(lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<String> {
    if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
        return Ok(url);
    }

    let required = |key: &str| {
        lookup(key)
            .filter(|v| !v.is_empty())
            .with_context(|| format!("{key} must be set when DATABASE_URL is not"))
    };

    let host = required("DB_HOST")?;
    let name = required("DB_NAME")?;
    let user = required("DB_USER")?;
    let pass = lookup("DB_PASS").unwrap_or_default();
    let port: u16 = parse_or(lookup, "DB_PORT", 5432)?;
    let ssl = lookup("DB_SSL").unwrap_or_else(|| "disable".to_string());

    Ok(format!(
        "postgres://{user}:{pass}@{host}:{port}/{name}?sslmode={ssl}"
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/sso")]).unwrap();
        assert_eq!(cfg.env, AppEnv::Local);
        assert_eq!(cfg.http_addr.port(), 44044);
        assert_eq!(cfg.token_ttl, Duration::from_secs(3600));
        assert_eq!(cfg.store_timeout, Duration::from_secs(5));
        assert_eq!(cfg.hash_cost, HashCost::default());
        assert!(cfg.run_migrations);
    }

    #[test]
    fn test_dsn_from_parts() {
        let cfg = config(&[
            ("DB_HOST", "db"),
            ("DB_NAME", "sso"),
            ("DB_USER", "svc"),
            ("DB_PASS", "pw"),
            ("DB_SSL", "require"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url, "postgres://svc:pw@db:5432/sso?sslmode=require");
    }

    #[test]
    fn test_missing_database() {
        let err = config(&[]).unwrap_err();
        assert!(err.to_string().contains("DB_HOST"));
    }

    #[test]
    fn test_malformed_values() {
        let base = ("DATABASE_URL", "postgres://localhost/sso");

        let err = config(&[base, ("TOKEN_TTL_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("TOKEN_TTL_SECS"));

        assert!(config(&[base, ("TOKEN_TTL_SECS", "0")]).is_err());
        assert!(config(&[base, ("APP_ENV", "staging")]).is_err());
        assert!(config(&[base, ("RUN_MIGRATIONS", "yes")]).is_err());
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let base = ("DATABASE_URL", "postgres://localhost/sso");

        let err = config(&[base, ("STORE_TIMEOUT_SECS", "0")]).unwrap_err();
        assert_eq!(err.to_string(), "STORE_TIMEOUT_SECS must be positive");

        let err = config(&[base, ("REQUEST_TIMEOUT_SECS", "0")]).unwrap_err();
        assert_eq!(err.to_string(), "REQUEST_TIMEOUT_SECS must be positive");

        let cfg = config(&[base, ("STORE_TIMEOUT_SECS", "1")]).unwrap();
        assert_eq!(cfg.store_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://localhost/sso"),
            ("APP_ENV", "prod"),
            ("HTTP_ADDR", "127.0.0.1:8080"),
            ("TOKEN_TTL_SECS", "60"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();
        assert_eq!(cfg.env, AppEnv::Prod);
        assert_eq!(cfg.http_addr.port(), 8080);
        assert_eq!(cfg.auth_config().token_ttl, Duration::from_secs(60));
        assert!(!cfg.run_migrations);
    }
}
