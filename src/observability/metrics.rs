//! Counters for each pipeline stage.
//!
//! Recording is a no-op until [`init_metrics`] installs a Prometheus exporter, which
//! only happens when `ADI_METRICS_PORT` is set.

use std::net::SocketAddr;

pub const METRICS_PORT_ENV: &str = "ADI_METRICS_PORT";

pub fn init_metrics() {
    let Some(port) = std::env::var(METRICS_PORT_ENV)
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
    else {
        return;
    };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => tracing::warn!("Prometheus exporter install failed: {}", e),
    }
}

pub mod geocode {
    pub fn request_sent() {
        ::metrics::counter!("adi_geocode_requests_total").increment(1);
    }

    pub fn fallback_attempted() {
        ::metrics::counter!("adi_geocode_fallback_total").increment(1);
    }

    pub fn skipped() {
        ::metrics::counter!("adi_geocode_ineligible_total").increment(1);
    }

    pub fn resolved() {
        ::metrics::counter!("adi_geocode_resolved_total").increment(1);
    }

    pub fn failed(reason: &'static str) {
        ::metrics::counter!("adi_geocode_failed_total", "reason" => reason).increment(1);
    }
}

pub mod fips {
    /// outcome: resolved | skipped | empty | malformed | error
    pub fn lookup(outcome: &'static str) {
        ::metrics::counter!("adi_fips_lookups_total", "outcome" => outcome).increment(1);
    }
}

pub mod adi {
    pub fn matched(version: &str) {
        ::metrics::counter!("adi_matches_total", "version" => version.to_string()).increment(1);
    }

    pub fn unmatched() {
        ::metrics::counter!("adi_unmatched_total").increment(1);
    }

    pub fn invalid_fips() {
        ::metrics::counter!("adi_invalid_fips_total").increment(1);
    }
}

pub mod output {
    pub fn rows_written(rows: usize) {
        ::metrics::counter!("adi_output_rows_total").increment(rows as u64);
    }
}
