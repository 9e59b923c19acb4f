use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::{GeocodeError, GeocodeResult, Geocoder};
use crate::config::Config;
use crate::utils::geo::Coordinate;

/// Client for the Mapbox forward geocoding API (v5, `mapbox.places`).
#[derive(Clone)]
pub struct MapboxClient {
    inner: reqwest::Client,
    base: Url,
    token: String,
    retry: bool,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    center: Coordinate,
    place_name: String,
}

impl MapboxClient {
    pub fn new(base: &str, token: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let base: Url = base
            .parse()
            .map_err(|e| GeocodeError::InvalidUrl(format!("{base} is not a valid url: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(GeocodeError::InvalidUrl(format!("{base} cannot be a base url")));
        }

        let inner = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner,
            base,
            token: token.to_string(),
            retry: false,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GeocodeError> {
        Ok(Self::new(
            &config.geocoding_base_url,
            &config.mapbox_token,
            config.geocoding_timeout,
        )?
        .with_retry(config.geocoding_retry))
    }

    /// Retry a transient failure once, immediately.
    pub fn with_retry(mut self, retry: bool) -> Self {
        self.retry = retry;
        self
    }

    /// Build the lookup url for `address`, which travels as a single
    /// percent-encoded path segment.
    pub fn forward_url(&self, address: &str) -> Result<Url, GeocodeError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| GeocodeError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(["geocoding", "v5", "mapbox.places"])
            .push(&format!("{address}.json"));
        url.query_pairs_mut()
            .append_pair("access_token", &self.token)
            .append_pair("limit", "1");

        Ok(url)
    }

    async fn lookup(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        let url = self.forward_url(address)?;

        let collection: FeatureCollection = self
            .inner
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let feature = collection
            .features
            .into_iter()
            .next()
            .ok_or(GeocodeError::NotFound)?;

        Ok(GeocodeResult {
            coordinates: feature.center,
            display_name: feature.place_name,
        })
    }
}

#[async_trait]
impl Geocoder for MapboxClient {
    async fn forward(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        tracing::debug!(address = %address, "Geocoding address");

        match self.lookup(address).await {
            Err(e) if self.retry && e.is_transient() => {
                tracing::warn!(error = %e, "Geocoding failed, retrying once");
                self.lookup(address).await
            }
            result => result,
        }
    }
}
