use crate::app::ports::{GeocodeMatch, GeocoderPort};
use crate::config::GeocoderConfig;
use crate::error::{AdiError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Google Maps Geocoding API client
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeMatch>,
    #[serde(default)]
    error_message: Option<String>,
}

impl GoogleGeocoder {
    pub fn new(config: &GeocoderConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl GeocoderPort for GoogleGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodeMatch>> {
        tracing::debug!("Geocoding '{}'", query);
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("address", query), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let body: GeocodeResponse = resp.json().await?;

        match body.status.as_str() {
            "OK" => Ok(body.results.into_iter().next()),
            "ZERO_RESULTS" => Ok(None),
            status => Err(AdiError::Api {
                message: match body.error_message {
                    Some(detail) => format!("geocoder returned {}: {}", status, detail),
                    None => format!("geocoder returned {}", status),
                },
            }),
        }
    }
}
