use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::app::ports::{CensusBlockPort, RateLimiterPort};
use crate::domain::{AddressRecord, Resolution, SkipReason};
use crate::observability::metrics;

/// Use case for looking up the census block FIPS code of a geocoded address
pub struct FipsUseCase {
    census: Arc<dyn CensusBlockPort>,
    limiter: Arc<dyn RateLimiterPort>,
}

impl FipsUseCase {
    pub fn new(census: Arc<dyn CensusBlockPort>, limiter: Arc<dyn RateLimiterPort>) -> Self {
        Self { census, limiter }
    }

    pub async fn resolve(&self, record: &mut AddressRecord) -> Resolution<String> {
        let Some(coordinates) = record.coordinates() else {
            info!("Cannot look up FIPS code: this address is missing latitude/longitude coordinates");
            metrics::fips::lookup("skipped");
            return Resolution::Skipped(SkipReason::MissingCoordinates);
        };

        self.limiter.pause().await;
        let body = match self.census.find_block(coordinates, record.census_year()).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Encountered an error with the census block lookup: {}", e);
                metrics::fips::lookup("error");
                return Resolution::Failed(e.to_string());
            }
        };

        match extract_block_fips(&body) {
            BlockFips::Present(fips) => {
                record.set_fips(fips.clone());
                metrics::fips::lookup("resolved");
                Resolution::Resolved(fips)
            }
            BlockFips::Empty => {
                warn!("Census block service returned no FIPS code");
                metrics::fips::lookup("empty");
                Resolution::Failed("census block FIPS was empty".to_string())
            }
            BlockFips::Malformed => {
                warn!("Got data in an unexpected format from the census block service: {}", body);
                metrics::fips::lookup("malformed");
                Resolution::Failed("unexpected census block response".to_string())
            }
        }
    }
}

#[derive(Debug, PartialEq)]
enum BlockFips {
    Present(String),
    Empty,
    Malformed,
}

/// Expects `{"Block": {"FIPS": "..."}}`; a null or empty FIPS is reported apart from
/// a response of the wrong shape.
fn extract_block_fips(body: &Value) -> BlockFips {
    let Some(fips) = body
        .get("Block")
        .and_then(|block| block.as_object())
        .and_then(|b| b.get("FIPS"))
    else {
        return BlockFips::Malformed;
    };
    match fips {
        Value::Null => BlockFips::Empty,
        Value::String(s) if s.is_empty() => BlockFips::Empty,
        Value::String(s) => BlockFips::Present(s.clone()),
        _ => BlockFips::Malformed,
    }
}
