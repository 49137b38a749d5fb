use std::{env, str::FromStr};

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Redis { url: String },
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreBackend,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub rate_limit_per_minute: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreBackend::Memory,
            port: 3001,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            rate_limit_per_minute: 1000,
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let store = match lookup("REVIEW_STORE")
            .unwrap_or_else(|| "redis".into())
            .trim()
            .to_lowercase()
            .as_str()
        {
            "redis" => StoreBackend::Redis {
                url: lookup("REDIS_URL")
                    .ok_or_else(|| AppError::EnvError("REDIS_URL must be set".into()))?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(AppError::EnvError(format!(
                    "REVIEW_STORE must be 'redis' or 'memory', got '{}'",
                    other
                )));
            }
        };

        let port = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins);

        let rate_limit_per_minute = parse_var(&lookup, "RATE_LIMIT_PER_MINUTE")?
            .unwrap_or(defaults.rate_limit_per_minute);
        if rate_limit_per_minute == 0 {
            return Err(AppError::EnvError(
                "RATE_LIMIT_PER_MINUTE must be greater than 0".into(),
            ));
        }

        Ok(Self {
            store,
            port,
            allowed_origins,
            rate_limit_per_minute,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| AppError::EnvError(format!("{} has an invalid value: {}", key, raw)))
        })
        .transpose()
}
