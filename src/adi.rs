//! ADI reference tables.
//!
//! Each CSV downloaded from the Neighborhood Atlas becomes one [`AdiDataset`], named
//! after the file (for example `US_2022_v4_0_1`). Several files can be loaded side by
//! side to report more than one ADI release or region per address.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::constants::{
    ADI_FILE_EXTENSION, FIPS_COLUMN, GISJOIN_COLUMN, NATIONAL_RANK_COLUMN, STATE_RANK_COLUMN,
};
use crate::domain::RankPair;
use crate::error::{AdiError, Result};
use crate::fips::gisjoin_to_fips;

/// Read-only lookup table for one ADI release.
#[derive(Debug, Clone, PartialEq)]
pub struct AdiDataset {
    version: String,
    ranks: HashMap<String, RankPair>,
}

impl AdiDataset {
    pub fn new(version: impl Into<String>, ranks: HashMap<String, RankPair>) -> Self {
        Self {
            version: version.into(),
            ranks,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Ranks for a 12-digit FIPS code.
    pub fn get(&self, fips: &str) -> Option<&RankPair> {
        self.ranks.get(fips)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Where each row's FIPS code comes from.
#[derive(Clone, Copy)]
enum FipsSource {
    Native(usize),
    Gisjoin(usize),
}

/// Loads every `.csv` file in `dir`, in file-name order, one dataset per file.
pub fn load_adi_directory(dir: &Path) -> Result<Vec<AdiDataset>> {
    let mut files: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case(ADI_FILE_EXTENSION))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();

    let mut datasets = Vec::with_capacity(files.len());
    for path in files {
        datasets.push(load_adi_file(&path)?);
    }
    info!("Loaded {} ADI dataset(s) from {}", datasets.len(), dir.display());
    Ok(datasets)
}

/// Loads one ADI CSV; the version is the file's base name.
pub fn load_adi_file(path: &Path) -> Result<AdiDataset> {
    let version = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| AdiError::Config(format!("Unusable ADI file name: {}", path.display())))?
        .to_string();
    debug!("Reading ADI file {}", path.display());
    let file = fs::File::open(path)?;
    load_dataset_from_reader(&version, file)
}

/// Builds a dataset from CSV text. `FIPS` is used when present, otherwise the FIPS code
/// is derived from `GISJOIN`. Unreadable rows and rows whose GISJOIN cannot be
/// converted are dropped; short rows are kept with the missing ranks left empty.
pub fn load_dataset_from_reader<R: Read>(version: &str, reader: R) -> Result<AdiDataset> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let missing = |name: &str| AdiError::MissingColumn {
        file: version.to_string(),
        column: name.to_string(),
    };

    let fips_source = match (column(FIPS_COLUMN), column(GISJOIN_COLUMN)) {
        (Some(idx), _) => FipsSource::Native(idx),
        (None, Some(idx)) => FipsSource::Gisjoin(idx),
        (None, None) => {
            return Err(missing(&format!("{} or {}", FIPS_COLUMN, GISJOIN_COLUMN)));
        }
    };
    let state_idx = column(STATE_RANK_COLUMN).ok_or_else(|| missing(STATE_RANK_COLUMN))?;
    let national_idx = column(NATIONAL_RANK_COLUMN).ok_or_else(|| missing(NATIONAL_RANK_COLUMN))?;

    let mut ranks = HashMap::new();
    let mut dropped = 0usize;
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("{}: skipping unreadable row: {}", version, e);
                dropped += 1;
                continue;
            }
        };
        let fips = match fips_source {
            FipsSource::Native(idx) => row.get(idx).unwrap_or_default().to_string(),
            FipsSource::Gisjoin(idx) => match gisjoin_to_fips(row.get(idx).unwrap_or_default()) {
                Ok(fips) => fips,
                Err(e) => {
                    warn!("{}: {}", version, e);
                    dropped += 1;
                    continue;
                }
            },
        };
        let state = row.get(state_idx).unwrap_or_default();
        let national = row.get(national_idx).unwrap_or_default();
        ranks.insert(fips, RankPair::new(state, national));
    }

    if dropped > 0 {
        warn!("{}: dropped {} unusable row(s)", version, dropped);
    }
    info!("ADI dataset '{}' holds {} FIPS code(s)", version, ranks.len());
    Ok(AdiDataset::new(version, ranks))
}
