use std::env;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_GEOCODING_BASE_URL: &str = "https://api.mapbox.com";
const DEFAULT_CURRENCY_SYMBOL: &str = "\u{20b5}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}: expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mapbox_token: String,
    pub geocoding_base_url: String,
    pub geocoding_timeout: Duration,
    /// Retry a failed geocoding call once before giving up.
    pub geocoding_retry: bool,
    pub server_host: String,
    pub server_port: u16,
    /// Prefix for the formatted fare, e.g. a currency sign.
    pub currency_symbol: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mapbox_token = lookup("MAPBOX_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("MAPBOX_TOKEN"))?;

        let timeout_secs: u64 = parse_or(&lookup, "GEOCODING_TIMEOUT_SECS", 10, "whole seconds")?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "GEOCODING_TIMEOUT_SECS",
                value: "0".to_string(),
                expected: "a positive number of seconds",
            });
        }

        Ok(Self {
            mapbox_token,
            geocoding_base_url: lookup("MAPBOX_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEOCODING_BASE_URL.to_string()),
            geocoding_timeout: Duration::from_secs(timeout_secs),
            geocoding_retry: parse_bool(&lookup, "GEOCODING_RETRY")?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_or(&lookup, "PORT", 3000, "a port number")?,
            currency_symbol: lookup("FARE_CURRENCY_SYMBOL")
                .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value,
            expected,
        }),
    }
}

fn parse_bool<F>(lookup: &F, name: &'static str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(false);
    };

    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value,
            expected: "true or false",
        }),
    }
}
