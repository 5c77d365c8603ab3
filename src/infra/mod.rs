pub mod google_geocoder;
pub mod fcc_census_block;
pub mod rate_limiter_adapter;
pub mod csv_address_source;
pub mod csv_output_adapter;
pub mod templates;
