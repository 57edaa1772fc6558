use std::{path::PathBuf, str::FromStr};

use crate::models::error::ConfigError;

pub const DEFAULT_GUARDIAN_BASE_URL: &str = "https://content.guardianapis.com";
pub const DEFAULT_MEDIASTACK_BASE_URL: &str = "http://api.mediastack.com";
/// Ten years.
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365 * 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: u64,
    pub guardian_api_key: String,
    pub guardian_base_url: String,
    pub mediastack_api_key: String,
    pub mediastack_base_url: String,
    pub provider_timeout_secs: u64,
    pub cors_origin: String,
    pub users_file: Option<PathBuf>,
}

impl Config {
    pub fn init() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. `init` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let or_default = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let token_ttl_hours = parse(&lookup, "TOKEN_TTL_HOURS", 168)?;
        if token_ttl_hours == 0 || token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(ConfigError::Invalid {
                name: "TOKEN_TTL_HOURS",
                value: token_ttl_hours.to_string(),
            });
        }

        Ok(Config {
            host: or_default("HOST", "127.0.0.1"),
            port: parse(&lookup, "PORT", 5000)?,
            jwt_secret: required("JWT_SECRET")?,
            token_ttl_hours,
            guardian_api_key: required("GUARDIAN_API_KEY")?,
            guardian_base_url: or_default("GUARDIAN_BASE_URL", DEFAULT_GUARDIAN_BASE_URL),
            mediastack_api_key: required("MEDIASTACK_API_KEY")?,
            mediastack_base_url: or_default("MEDIASTACK_BASE_URL", DEFAULT_MEDIASTACK_BASE_URL),
            provider_timeout_secs: parse(&lookup, "PROVIDER_TIMEOUT_SECS", 10)?,
            cors_origin: or_default("CORS_ORIGIN", "http://localhost:3000"),
            users_file: lookup("USERS_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name).filter(|v| !v.is_empty()) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
