use crate::app::ports::AddressSourcePort;
use crate::domain::AddressRecord;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;

/// Reads input addresses from a CSV with `street,apt_num,city,state,zip` headers
pub struct CsvAddressSource {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct AddressRow {
    #[serde(default)]
    street: String,
    #[serde(default)]
    apt_num: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    zip: String,
}

impl CsvAddressSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Parses address rows; every row becomes one record for `census_year`.
pub fn read_addresses<R: Read>(reader: R, census_year: u16) -> Result<Vec<AddressRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<AddressRow>().enumerate() {
        let row = row.with_context(|| format!("Failed to read address row {}", idx + 1))?;
        records.push(AddressRecord::new(
            row.street,
            row.apt_num,
            row.city,
            row.state,
            row.zip,
            census_year,
        ));
    }
    Ok(records)
}

#[async_trait]
impl AddressSourcePort for CsvAddressSource {
    async fn load_addresses(&self, census_year: u16) -> Result<Vec<AddressRecord>> {
        if !self.path.is_file() {
            bail!(
                "Address file not found at {} (run `adi_lookup init` to create a template)",
                self.path.display()
            );
        }
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("Failed to open address file {}", self.path.display()))?;
        read_addresses(file, census_year)
    }
}
