//! Fixed values shared across the classifier, the loaders and the HTTP adapters.

/// PO box spellings matched as substrings of the uppercased street.
pub const PO_BOX_VARIANTS: [&str; 12] = [
    "POBOX",
    "PO BOX",
    "P O BOX",
    "P.O BOX",
    "P.OBOX",
    "P. O BOX",
    "PO. BOX",
    "PO.BOX",
    "P O. BOX",
    "P.O. BOX",
    "P. O. BOX",
    "P.O.BOX",
];

// https://www.usps.com/ship/apo-fpo-dpo.htm
pub const MILITARY_POST_OFFICES: [&str; 3] = ["APO", "FPO", "DPO"];
pub const MILITARY_STATES: [&str; 3] = ["AA", "AP", "AE"];
pub const MILITARY_STREET_MARKER: &str = "PSC ";

// ADI source columns
pub const FIPS_COLUMN: &str = "FIPS";
pub const GISJOIN_COLUMN: &str = "GISJOIN";
pub const STATE_RANK_COLUMN: &str = "ADI_STATERNK";
pub const NATIONAL_RANK_COLUMN: &str = "ADI_NATRANK";
pub const ADI_FILE_EXTENSION: &str = "csv";

/// Header of the address template written by `init`.
pub const ADDRESS_HEADER: &str = "street,apt_num,city,state,zip";

pub const OUTPUT_FILE_PREFIX: &str = "addresses-output-";

pub const DEFAULT_CENSUS_YEAR: u16 = 2020;
pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const FCC_CENSUS_BLOCK_URL: &str = "https://geo.fcc.gov/api/census/block/find";
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_CLOUD_API_KEY";
