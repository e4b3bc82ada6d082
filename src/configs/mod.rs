use std::str::FromStr;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    api::error,
    constants::{DEFAULT_ACCESS_TOKEN_EXPIRATION, DEFAULT_MAX_CONNECTIONS},
};

/// Credential settings shared by token issuance and verification.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_expiration: u64,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, error::SystemError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, error::SystemError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| error::SystemError::config(format!("{key} must be set")))
        };

        let jwt_secret = required("SECRET_KEY")?;
        let database_url = required("DATABASE_URL")?;

        let access_token_expiration =
            parse_or(&lookup, "ACCESS_TOKEN_EXPIRATION", DEFAULT_ACCESS_TOKEN_EXPIRATION)?;
        let max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let port = parse_or(&lookup, "PORT", 8080u16)?;

        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:5173".to_string());
        let ip = lookup("IP").unwrap_or_else(|| "127.0.0.1".to_string());

        Ok(AppConfig {
            auth: AuthConfig { jwt_secret, access_token_expiration },
            database: DatabaseConfig { url: database_url, max_connections },
            frontend_url,
            ip,
            port,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, error::SystemError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| error::SystemError::config(format!("{key} has an invalid value: {raw}"))),
        None => Ok(default),
    }
}

pub async fn connect_database(config: &DatabaseConfig) -> Result<PgPool, error::SystemError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(&config.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Database connected and migrations applied");

    Ok(pool)
}
