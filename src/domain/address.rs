use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Latitude and longitude are only ever stored together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// ADI state and national rank. Kept as text because suppression codes
/// ("GQ", "PH", "QDI", ...) appear where a rank cannot be published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankPair {
    pub state: String,
    pub national: String,
}

impl RankPair {
    pub fn new(state: impl Into<String>, national: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            national: national.into(),
        }
    }
}

/// ADI version identifier -> ranks. One entry per version; re-recording a version
/// replaces the earlier ranks.
pub type AdiMatches = BTreeMap<String, RankPair>;

/// One input address plus everything the pipeline learns about it.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressRecord {
    street: String,
    apt_num: String,
    city: String,
    state: String,
    zipcode: String,
    census_year: u16,

    coordinates: Option<Coordinates>,
    fips: String,
    adi: AdiMatches,
}

impl AddressRecord {
    pub fn new(
        street: impl Into<String>,
        apt_num: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zipcode: impl Into<String>,
        census_year: u16,
    ) -> Self {
        Self {
            street: street.into(),
            apt_num: apt_num.into(),
            city: city.into(),
            state: state.into(),
            zipcode: zipcode.into(),
            census_year,
            coordinates: None,
            fips: String::new(),
            adi: AdiMatches::new(),
        }
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn apt_num(&self) -> &str {
        &self.apt_num
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zipcode(&self) -> &str {
        &self.zipcode
    }

    pub fn census_year(&self) -> u16 {
        self.census_year
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn fips(&self) -> &str {
        &self.fips
    }

    pub fn adi(&self) -> &AdiMatches {
        &self.adi
    }

    /// Full address in the form sent to the geocoder. Empty parts still take a slot,
    /// so missing fields show up as double spaces.
    pub fn full_address(&self) -> String {
        [
            self.street.as_str(),
            self.apt_num.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.zipcode.as_str(),
        ]
        .join(" ")
    }

    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.coordinates = Some(coordinates);
    }

    /// Stores a census block FIPS code. Refused (returns false) while the record has
    /// no coordinates.
    pub fn set_fips(&mut self, fips: impl Into<String>) -> bool {
        if self.coordinates.is_none() {
            warn!("Refusing to store a FIPS code on an address without coordinates");
            return false;
        }
        self.fips = fips.into();
        true
    }

    pub fn record_adi(&mut self, version: impl Into<String>, ranks: RankPair) {
        self.adi.insert(version.into(), ranks);
    }
}
