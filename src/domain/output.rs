use serde::Serialize;

use super::address::AddressRecord;

/// One output line: an address crossed with one matched ADI version.
/// Field order is the column order of the output file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub street: String,
    pub apt_num: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub census_year: u16,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub fips: String,
    pub adi_version: String,
    pub adi_state: String,
    pub adi_national: String,
}

/// Fans a record out into one row per ADI version it matched. Records without any
/// match produce no rows.
pub fn expand_rows(record: &AddressRecord) -> Vec<OutputRow> {
    let coordinates = record.coordinates();
    record
        .adi()
        .iter()
        .map(|(version, ranks)| OutputRow {
            street: record.street().to_string(),
            apt_num: record.apt_num().to_string(),
            city: record.city().to_string(),
            state: record.state().to_string(),
            zipcode: record.zipcode().to_string(),
            census_year: record.census_year(),
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
            fips: record.fips().to_string(),
            adi_version: version.clone(),
            adi_state: ranks.state.clone(),
            adi_national: ranks.national.clone(),
        })
        .collect()
}
