use anyhow::Result;
use serde::Serialize;
use tracing::{info, Instrument};

use crate::app::adi_match_use_case::AdiMatchUseCase;
use crate::app::fips_use_case::FipsUseCase;
use crate::app::geocode_use_case::GeocodeUseCase;
use crate::app::ports::OutputRowPort;
use crate::domain::{expand_rows, AddressRecord, Resolution, SkipReason};
use crate::observability::metrics;

/// Use case driving each address through geocoding, FIPS lookup and ADI matching,
/// one address at a time, and writing the resulting rows
pub struct EnrichUseCase {
    geocode: GeocodeUseCase,
    fips: FipsUseCase,
    adi: AdiMatchUseCase,
    output: Box<dyn OutputRowPort>,
}

/// Counts for one run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total_addresses: usize,
    pub ineligible: usize,
    pub geocoded: usize,
    pub fips_resolved: usize,
    pub adi_matched: usize,
    pub rows_written: usize,
}

impl EnrichUseCase {
    pub fn new(
        geocode: GeocodeUseCase,
        fips: FipsUseCase,
        adi: AdiMatchUseCase,
        output: Box<dyn OutputRowPort>,
    ) -> Self {
        Self {
            geocode,
            fips,
            adi,
            output,
        }
    }

    /// Enrich a single address in place
    pub async fn enrich_record(&self, record: &mut AddressRecord, summary: &mut RunSummary) {
        info!("Getting latitude/longitude coords");
        match self.geocode.resolve(record).await {
            Resolution::Resolved(_) => summary.geocoded += 1,
            Resolution::Skipped(SkipReason::Ineligible) => summary.ineligible += 1,
            _ => {}
        }

        info!("Getting FIPS code");
        if self.fips.resolve(record).await.is_resolved() {
            summary.fips_resolved += 1;
        }

        info!("Looking up ADI rankings");
        if let Resolution::Resolved(n) = self.adi.resolve(record) {
            if n > 0 {
                summary.adi_matched += 1;
            }
        }
    }

    /// Enrich every address and write one row per matched ADI version. Only output
    /// failures end the run early.
    pub async fn run(&self, records: &mut [AddressRecord]) -> Result<RunSummary> {
        let mut summary = RunSummary {
            total_addresses: records.len(),
            ..Default::default()
        };
        let total = records.len();

        for (i, record) in records.iter_mut().enumerate() {
            info!("Address {}/{}", i + 1, total);
            let span = tracing::info_span!("address", index = i + 1, total);
            self.enrich_record(record, &mut summary).instrument(span).await;
        }

        for record in records.iter() {
            for row in expand_rows(record) {
                self.output.write_row(&row).await?;
                summary.rows_written += 1;
            }
        }
        self.output.finish().await?;
        metrics::output::rows_written(summary.rows_written);

        info!(
            "Processed {} address(es): {} geocoded, {} with FIPS, {} with ADI ranks, {} row(s) written",
            summary.total_addresses,
            summary.geocoded,
            summary.fips_resolved,
            summary.adi_matched,
            summary.rows_written
        );
        Ok(summary)
    }
}
