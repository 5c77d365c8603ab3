//! Geocodes postal addresses, looks up their census block FIPS codes and attaches
//! Area Deprivation Index rankings from one or more ADI releases.

pub mod adi;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod fips;
pub mod logging;
pub mod observability;

// Layered boundaries for application and infrastructure
pub mod app;
pub mod infra;
