use std::str::FromStr;

use crate::server::error::config::ConfigError;

/// Server configuration read from environment variables.
pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    /// PEM encoded RSA public key Clerk signs session tokens with
    pub clerk_jwt_public_key: String,
    /// Expected `iss` claim, unchecked when unset
    pub clerk_issuer: Option<String>,
    pub bind_address: String,
    /// Largest attachment accepted, in bytes
    pub max_attachment_size: i64,
    /// Days a ticket stays RESOLVED before it is closed automatically
    pub auto_close_resolved_after_days: i64,
    /// Days read notifications are kept
    pub notification_retention_days: i64,
}

impl Config {
    pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
    pub const DEFAULT_MAX_ATTACHMENT_SIZE: i64 = 10 * 1024 * 1024;
    pub const DEFAULT_AUTO_CLOSE_RESOLVED_AFTER_DAYS: i64 = 7;
    pub const DEFAULT_NOTIFICATION_RETENTION_DAYS: i64 = 30;

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            // Keys pasted into .env files usually carry escaped newlines
            clerk_jwt_public_key: required("CLERK_JWT_PUBLIC_KEY")?.replace("\\n", "\n"),
            clerk_issuer: optional("CLERK_ISSUER"),
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| Self::DEFAULT_BIND_ADDRESS.to_string()),
            max_attachment_size: positive_or(
                "MAX_ATTACHMENT_SIZE",
                Self::DEFAULT_MAX_ATTACHMENT_SIZE,
            )?,
            auto_close_resolved_after_days: positive_or(
                "AUTO_CLOSE_RESOLVED_AFTER_DAYS",
                Self::DEFAULT_AUTO_CLOSE_RESOLVED_AFTER_DAYS,
            )?,
            notification_retention_days: positive_or(
                "NOTIFICATION_RETENTION_DAYS",
                Self::DEFAULT_NOTIFICATION_RETENTION_DAYS,
            )?,
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

/// Unset and empty variables are both treated as missing.
fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn positive_or(var: &str, default: i64) -> Result<i64, ConfigError> {
    let Some(raw) = optional(var) else {
        return Ok(default);
    };

    let value = parse::<i64>(var, &raw)?;
    if value <= 0 {
        return Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(value)
}

fn parse<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        })
}
