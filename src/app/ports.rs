use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{AddressRecord, Coordinates, OutputRow};
use crate::error::Result;

// Lookup-side ports
#[async_trait]
pub trait GeocoderPort: Send + Sync {
    /// Free-text address query. `Ok(None)` means the service found no match.
    async fn geocode(&self, query: &str) -> Result<Option<GeocodeMatch>>;
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GeocodeMatch {
    #[serde(default)]
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[async_trait]
pub trait CensusBlockPort: Send + Sync {
    /// Raw JSON body of the census block lookup; shape checks are left to the caller.
    async fn find_block(
        &self,
        coordinates: Coordinates,
        census_year: u16,
    ) -> Result<serde_json::Value>;
}

#[async_trait]
pub trait RateLimiterPort: Send + Sync {
    /// Awaited before every outbound request.
    async fn pause(&self);
}

// Run-side ports
#[async_trait]
pub trait AddressSourcePort: Send + Sync {
    async fn load_addresses(&self, census_year: u16) -> anyhow::Result<Vec<AddressRecord>>;
}

#[async_trait]
pub trait OutputRowPort: Send + Sync {
    async fn write_row(&self, row: &OutputRow) -> anyhow::Result<()>;
    async fn finish(&self) -> anyhow::Result<()>;
}
