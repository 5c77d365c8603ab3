// Observability: metrics counters; logging lives in crate::logging

pub mod metrics;

pub use metrics::init_metrics;
