use anyhow::{Context, Result};
use std::{str::FromStr, time::Duration};

#[derive(Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST").context("DATABASE_HOST is not set")?,
            port: std::env::var("DATABASE_PORT")
                .context("DATABASE_PORT is not set")?
                .parse::<u16>()?,
            username: std::env::var("DATABASE_USERNAME")
                .context("DATABASE_USERNAME is not set")?,
            password: std::env::var("DATABASE_PASSWORD")
                .context("DATABASE_PASSWORD is not set")?,
            database: std::env::var("DATABASE_NAME").context("DATABASE_NAME is not set")?,
            acquire_timeout: Duration::from_secs(env_or("DATABASE_ACQUIRE_TIMEOUT_SECS", 5)?),
            statement_timeout: Duration::from_millis(env_or(
                "DATABASE_STATEMENT_TIMEOUT_MS",
                5_000,
            )?),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10)?,
        };
        let auth = AuthConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            ttl: env_or("AUTH_TOKEN_TTL", 3_600)?,
        };
        let server = ServerConfig {
            port: env_or("SERVER_PORT", 8080)?,
        };
        Ok(Self {
            database,
            auth,
            server,
        })
    }
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
    pub max_connections: u32,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    // アクセストークンの有効期間（秒）
    pub ttl: u64,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: {v}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_to_default_when_unset() {
        let v: u64 = env_or("CAMPUS_EVENTS_SURELY_UNSET_KEY", 42).unwrap();
        assert_eq!(v, 42);
    }
}
