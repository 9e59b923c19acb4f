//! Forward geocoding: resolving a free-text address to a coordinate.

pub mod mapbox;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::utils::geo::Coordinate;

pub use mapbox::MapboxClient;

/// The best match for an address.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub coordinates: Coordinate,
    /// Human readable name of the matched place.
    pub display_name: String,
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("no place matches the address")]
    NotFound,

    #[error("geocoding request timed out")]
    Timeout,

    #[error("geocoding request failed: {0}")]
    Transport(reqwest::Error),

    #[error("geocoding service responded with {0}")]
    Status(StatusCode),

    #[error("unexpected geocoding response: {0}")]
    Decode(String),

    #[error("cannot build geocoding url: {0}")]
    InvalidUrl(String),
}

impl GeocodeError {
    /// Whether a second attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GeocodeError::Timeout | GeocodeError::Transport(_) => true,
            GeocodeError::Status(status) => status.is_server_error(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        // The request url carries the access token
        let err = err.without_url();
        if err.is_timeout() {
            GeocodeError::Timeout
        } else if err.is_decode() {
            GeocodeError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            GeocodeError::Status(status)
        } else {
            GeocodeError::Transport(err)
        }
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `address` to its top-ranked match.
    async fn forward(&self, address: &str) -> Result<GeocodeResult, GeocodeError>;
}
