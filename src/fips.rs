//! Census identifier handling.
//!
//! ADI tables are keyed by 12-digit block group FIPS codes, while the census block
//! service hands back 15-digit block codes (occasionally 14 when the leading zero of
//! the state code was dropped). Some ADI releases carry no FIPS column at all and
//! only a GISJOIN identifier, which encodes the same digits with padding characters.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FipsError;

/// Length of the FIPS code ADI tables are keyed by.
pub const ADI_FIPS_LEN: usize = 12;

// G SS 0 CCC 0 XXXXXXX
static GISJOIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^G([0-9]{2})0([0-9]{3})0([0-9]{7})$").expect("GISJOIN pattern is valid")
});

/// Builds the 12-character lookup key for an ADI table from a FIPS code of
/// length 12, 14 or 15. The caller's value is left untouched.
pub fn normalize_fips(fips: &str) -> Result<String, FipsError> {
    let len = fips.chars().count();
    match len {
        12 => Ok(fips.to_string()),
        14 => Ok(format!("0{}", fips).chars().take(ADI_FIPS_LEN).collect()),
        15 => Ok(fips.chars().take(ADI_FIPS_LEN).collect()),
        other => Err(FipsError::InvalidLength(other)),
    }
}

/// Converts a GISJOIN such as `G01000100208032` into the FIPS code `010010208032`
/// (state, county and remaining digits concatenated).
pub fn gisjoin_to_fips(gisjoin: &str) -> Result<String, FipsError> {
    let captures = GISJOIN_PATTERN
        .captures(gisjoin)
        .ok_or_else(|| FipsError::InvalidGisjoin(gisjoin.to_string()))?;
    Ok(format!("{}{}{}", &captures[1], &captures[2], &captures[3]))
}
