use crate::dotenv;
use crate::error::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_address: String,
    pub port: u16,
    pub max_connections: u32,
    pub mail_sender: String,
    /// Inactive admins still get membership notifications unless this is turned off.
    pub notify_inactive_admins: bool,
    pub run_migrations: bool,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).filter(|v| !v.is_empty()).ok_or_else(|| Error::ConfigError(format!("{} must be set", key)));
        Ok(Config {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "PORT", 8000)?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            mail_sender: lookup("MAIL_SENDER").unwrap_or_else(|| "no-reply@clubhub.local".into()),
            notify_inactive_admins: flag_or(&lookup, "NOTIFY_INACTIVE_ADMINS", true)?,
            run_migrations: flag_or(&lookup, "RUN_MIGRATIONS", true)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, Error>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| Error::ConfigError(format!("{} must be a valid number, got {:?}", key, v))),
    }
}

fn flag_or<F>(lookup: &F, key: &str, default: bool) -> Result<bool, Error>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(Error::ConfigError(format!("{} must be a boolean, got {:?}", key, v))),
        },
    }
}
