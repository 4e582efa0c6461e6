//! Environment-driven settings.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Capacity of every table's request channel.
    pub channel_buffer: usize,
    /// Origin the billing portal returns to.
    pub site_url: String,
    /// Container URL uploaded blobs are published under.
    pub storage_base_url: String,
    /// Origin of hosted checkout and portal pages.
    pub payments_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            channel_buffer: try_load(&lookup, "ADMIN_CHANNEL_BUFFER", "32")?,
            site_url: try_load(&lookup, "SITE_URL", "http://localhost:3000")?,
            storage_base_url: try_load(
                &lookup,
                "STORAGE_BASE_URL",
                "http://localhost:10000/devstoreaccount1/uploads",
            )?,
            payments_base_url: try_load(
                &lookup,
                "PAYMENTS_BASE_URL",
                "https://checkout.sandbox.local",
            )?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }
    })
}
