use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::adi::AdiDataset;
use crate::domain::{AddressRecord, Resolution, SkipReason};
use crate::fips::normalize_fips;
use crate::observability::metrics;

/// Use case for attaching ADI ranks from every loaded dataset to an address
pub struct AdiMatchUseCase {
    datasets: Arc<Vec<AdiDataset>>,
}

impl AdiMatchUseCase {
    pub fn new(datasets: Arc<Vec<AdiDataset>>) -> Self {
        Self { datasets }
    }

    pub fn datasets(&self) -> &[AdiDataset] {
        &self.datasets
    }

    /// Records the ranks of each dataset containing the address's block group and
    /// returns how many matched.
    pub fn resolve(&self, record: &mut AddressRecord) -> Resolution<usize> {
        if record.fips().is_empty() {
            info!("Cannot look up ADI ranks: this address is missing a FIPS code");
            return Resolution::Skipped(SkipReason::MissingFips);
        }

        // Same key for every dataset; a bad length rules all of them out.
        let key = match normalize_fips(record.fips()) {
            Ok(key) => key,
            Err(e) => {
                warn!("Skipping ADI lookup: {}", e);
                metrics::adi::invalid_fips();
                return Resolution::Failed(e.to_string());
            }
        };

        let mut matched = 0;
        for dataset in self.datasets.iter() {
            if let Some(ranks) = dataset.get(&key) {
                debug!("ADI '{}' matched {}: {:?}", dataset.version(), key, ranks);
                record.record_adi(dataset.version(), ranks.clone());
                metrics::adi::matched(dataset.version());
                matched += 1;
            }
        }
        if matched == 0 {
            metrics::adi::unmatched();
        }
        Resolution::Resolved(matched)
    }
}
