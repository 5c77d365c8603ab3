use crate::app::ports::CensusBlockPort;
use crate::config::CensusBlockConfig;
use crate::domain::Coordinates;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// FCC Area API census block lookup
pub struct FccCensusBlockClient {
    client: reqwest::Client,
    base_url: String,
}

impl FccCensusBlockClient {
    pub fn new(config: &CensusBlockConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl CensusBlockPort for FccCensusBlockClient {
    async fn find_block(
        &self,
        coordinates: Coordinates,
        census_year: u16,
    ) -> Result<serde_json::Value> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("censusYear", census_year.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await?;
        tracing::debug!("Census block response status={}", resp.status().as_u16());
        let text = resp.text().await?;
        let body = serde_json::from_str::<serde_json::Value>(&text)?;
        Ok(body)
    }
}
