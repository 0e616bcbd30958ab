//! Runtime configuration
//!
//! Values come from the environment (a `.env` file is loaded first if
//! present) and fall back to the defaults below.

use std::env;
use std::path::PathBuf;

use chrono::Duration;

use crate::error::{PassgenError, Result};

/// Secret used when `JWT_SECRET` is not set. Fine for the demo, nothing else.
pub const DEFAULT_JWT_SECRET: &str = "passgen-demo-jwt-secret";

/// Longest accepted session lifetime (one year)
pub const MAX_JWT_EXPIRES_IN_HOURS: i64 = 24 * 366;

/// Longest accepted reset token lifetime (one week)
pub const MAX_RESET_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 7;

#[derive(Debug, Clone)]
pub struct Config {
    /// Folder holding the history database
    pub data_dir: PathBuf,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime
    pub jwt_expires_in: Duration,
    /// Password reset token lifetime
    pub reset_token_ttl: Duration,
    /// Base URL used in reset links
    pub frontend_url: String,
    /// Argon2 memory cost in KiB
    pub hash_memory_kib: u32,
    /// Argon2 iterations
    pub hash_iterations: u32,
    /// Argon2 lanes
    pub hash_parallelism: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expires_in: Duration::days(7),
            reset_token_ttl: Duration::hours(1),
            frontend_url: "http://localhost:5173".to_string(),
            hash_memory_kib: 19456,
            hash_iterations: 2,
            hash_parallelism: 1,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("PASSGEN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                log::warn!("JWT_SECRET not set, using the built-in demo secret");
                defaults.jwt_secret
            }
        };

        let jwt_expires_in = parse_lifetime(
            &lookup,
            "JWT_EXPIRES_IN_HOURS",
            MAX_JWT_EXPIRES_IN_HOURS,
            Duration::try_hours,
        )?
        .unwrap_or(defaults.jwt_expires_in);

        let reset_token_ttl = parse_lifetime(
            &lookup,
            "RESET_TOKEN_TTL_MINUTES",
            MAX_RESET_TOKEN_TTL_MINUTES,
            Duration::try_minutes,
        )?
        .unwrap_or(defaults.reset_token_ttl);

        let frontend_url = lookup("FRONTEND_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.frontend_url);

        let hash_memory_kib = parse_number(&lookup, "ARGON2_MEMORY_KIB")?
            .unwrap_or(defaults.hash_memory_kib);
        let hash_iterations = parse_number(&lookup, "ARGON2_ITERATIONS")?
            .unwrap_or(defaults.hash_iterations);
        let hash_parallelism = parse_number(&lookup, "ARGON2_PARALLELISM")?
            .unwrap_or(defaults.hash_parallelism);

        Ok(Self {
            data_dir,
            jwt_secret,
            jwt_expires_in,
            reset_token_ttl,
            frontend_url,
            hash_memory_kib,
            hash_iterations,
            hash_parallelism,
        })
    }
}

fn parse_number<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse().map_err(|_| {
                PassgenError::ConfigError(format!("{key} is not a valid number: {raw}"))
            })
        })
        .transpose()
}

/// A positive lifetime of at most `max` units
fn parse_lifetime<F>(
    lookup: &F,
    key: &str,
    max: i64,
    to_duration: fn(i64) -> Option<Duration>,
) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = parse_number::<F, i64>(lookup, key)? else {
        return Ok(None);
    };

    if !(1..=max).contains(&value) {
        return Err(PassgenError::ConfigError(format!(
            "{key} must be between 1 and {max}, got {value}"
        )));
    }

    to_duration(value)
        .map(Some)
        .ok_or_else(|| PassgenError::ConfigError(format!("{key} is out of range: {value}")))
}
