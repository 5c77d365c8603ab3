use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::ports::{GeocodeMatch, GeocoderPort, RateLimiterPort};
use crate::domain::{can_geocode, AddressRecord, Coordinates, Resolution, SkipReason};
use crate::error::Result;
use crate::observability::metrics;

/// Use case for attaching latitude/longitude to an address
pub struct GeocodeUseCase {
    geocoder: Arc<dyn GeocoderPort>,
    limiter: Arc<dyn RateLimiterPort>,
}

impl GeocodeUseCase {
    pub fn new(geocoder: Arc<dyn GeocoderPort>, limiter: Arc<dyn RateLimiterPort>) -> Self {
        Self { geocoder, limiter }
    }

    /// Geocodes the record, retrying once without the house number when the full
    /// address finds nothing. Service failures are logged and reported as `Failed`.
    pub async fn resolve(&self, record: &mut AddressRecord) -> Resolution<Coordinates> {
        if !can_geocode(record.street(), record.city(), record.state()) {
            info!("This address is not eligible for geocoding");
            metrics::geocode::skipped();
            return Resolution::Skipped(SkipReason::Ineligible);
        }

        let full_address = record.full_address();
        match self.lookup_with_fallback(&full_address).await {
            Ok(Some(hit)) => {
                let coordinates = Coordinates {
                    latitude: hit.geometry.location.lat,
                    longitude: hit.geometry.location.lng,
                };
                debug!(
                    "Geocoded to ({}, {}) {:?}",
                    coordinates.latitude, coordinates.longitude, hit.formatted_address
                );
                record.set_coordinates(coordinates);
                metrics::geocode::resolved();
                Resolution::Resolved(coordinates)
            }
            Ok(None) => {
                warn!("Geocoder found no match for this address");
                metrics::geocode::failed("no_match");
                Resolution::Failed("no geocoding result".to_string())
            }
            Err(e) => {
                warn!("Encountered an error with geocoding: {}", e);
                metrics::geocode::failed("error");
                Resolution::Failed(e.to_string())
            }
        }
    }

    async fn lookup_with_fallback(&self, full_address: &str) -> Result<Option<GeocodeMatch>> {
        if let Some(hit) = self.lookup(full_address).await? {
            return Ok(Some(hit));
        }
        let alternate = strip_house_number(full_address);
        info!("Attempting alternate address '{}'", alternate);
        metrics::geocode::fallback_attempted();
        self.lookup(alternate).await
    }

    async fn lookup(&self, query: &str) -> Result<Option<GeocodeMatch>> {
        self.limiter.pause().await;
        metrics::geocode::request_sent();
        self.geocoder.geocode(query).await
    }
}

/// Drops leading ASCII digits, i.e. the house number of a street address.
fn strip_house_number(address: &str) -> &str {
    address.trim_start_matches(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::{Geometry, LatLng};
    use crate::error::AdiError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    struct ScriptedGeocoder {
        replies: Mutex<VecDeque<Result<Option<GeocodeMatch>>>>,
        queries: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedGeocoder {
        fn new(replies: Vec<Result<Option<GeocodeMatch>>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                queries: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl GeocoderPort for ScriptedGeocoder {
        async fn geocode(&self, query: &str) -> Result<Option<GeocodeMatch>> {
            self.queries.lock().await.push(query.to_string());
            self.replies.lock().await.pop_front().unwrap_or(Ok(None))
        }
    }

    #[derive(Default)]
    struct CountingLimiter {
        pauses: AtomicUsize,
    }

    #[async_trait]
    impl RateLimiterPort for CountingLimiter {
        async fn pause(&self) {
            self.pauses.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn hit(lat: f64, lng: f64) -> GeocodeMatch {
        GeocodeMatch {
            formatted_address: None,
            geometry: Geometry { location: LatLng { lat, lng } },
        }
    }

    fn address() -> AddressRecord {
        AddressRecord::new("123 Main St", "", "Madison", "WI", "53703", 2020)
    }

    #[tokio::test]
    async fn stores_coordinates_from_first_query() {
        let geocoder = Arc::new(ScriptedGeocoder::new(vec![Ok(Some(hit(43.07, -89.38)))]));
        let queries = geocoder.queries.clone();
        let limiter = Arc::new(CountingLimiter::default());
        let use_case = GeocodeUseCase::new(geocoder, limiter.clone());

        let mut record = address();
        let outcome = use_case.resolve(&mut record).await;

        let expected = Coordinates { latitude: 43.07, longitude: -89.38 };
        assert_eq!(outcome, Resolution::Resolved(expected));
        assert_eq!(record.coordinates(), Some(expected));
        assert_eq!(*queries.lock().await, vec!["123 Main St  Madison WI 53703"]);
        assert_eq!(limiter.pauses.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_once_without_house_number() {
        let geocoder = Arc::new(ScriptedGeocoder::new(vec![Ok(None), Ok(Some(hit(1.0, 2.0)))]));
        let queries = geocoder.queries.clone();
        let limiter = Arc::new(CountingLimiter::default());
        let use_case = GeocodeUseCase::new(geocoder, limiter.clone());

        let mut record = address();
        assert!(use_case.resolve(&mut record).await.is_resolved());
        assert_eq!(
            *queries.lock().await,
            vec!["123 Main St  Madison WI 53703", " Main St  Madison WI 53703"]
        );
        assert_eq!(limiter.pauses.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_fallback_misses() {
        let geocoder = Arc::new(ScriptedGeocoder::new(vec![Ok(None), Ok(None)]));
        let queries = geocoder.queries.clone();
        let use_case = GeocodeUseCase::new(geocoder, Arc::new(CountingLimiter::default()));

        let mut record = address();
        let outcome = use_case.resolve(&mut record).await;

        assert!(matches!(outcome, Resolution::Failed(_)));
        assert_eq!(queries.lock().await.len(), 2);
        assert_eq!(record.coordinates(), None);
    }

    #[tokio::test]
    async fn service_errors_are_not_propagated() {
        let geocoder = Arc::new(ScriptedGeocoder::new(vec![Err(AdiError::Api {
            message: "REQUEST_DENIED".to_string(),
        })]));
        let queries = geocoder.queries.clone();
        let use_case = GeocodeUseCase::new(geocoder, Arc::new(CountingLimiter::default()));

        let mut record = address();
        let outcome = use_case.resolve(&mut record).await;

        assert_eq!(outcome, Resolution::Failed("API error: REQUEST_DENIED".to_string()));
        assert_eq!(queries.lock().await.len(), 1);
        assert_eq!(record.coordinates(), None);
    }

    #[tokio::test]
    async fn ineligible_addresses_never_reach_the_geocoder() {
        let geocoder = Arc::new(ScriptedGeocoder::new(vec![]));
        let queries = geocoder.queries.clone();
        let limiter = Arc::new(CountingLimiter::default());
        let use_case = GeocodeUseCase::new(geocoder, limiter.clone());

        let mut record = AddressRecord::new("PO Box 12", "", "Madison", "WI", "53703", 2020);
        let outcome = use_case.resolve(&mut record).await;

        assert_eq!(outcome, Resolution::Skipped(SkipReason::Ineligible));
        assert!(queries.lock().await.is_empty());
        assert_eq!(limiter.pauses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn house_number_is_stripped() {
        assert_eq!(strip_house_number("1600 Amphitheatre Pkwy"), " Amphitheatre Pkwy");
        assert_eq!(strip_house_number("Main St"), "Main St");
    }
}
