pub mod ports;
pub mod geocode_use_case;
pub mod fips_use_case;
pub mod adi_match_use_case;
pub mod enrich_use_case;
