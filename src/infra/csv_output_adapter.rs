use crate::app::ports::OutputRowPort;
use crate::constants::OUTPUT_FILE_PREFIX;
use crate::domain::OutputRow;
use anyhow::{anyhow, Context};
use chrono::{DateTime, Local};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// File-based implementation of OutputRowPort
/// Writes one CSV line per address/ADI version pair
pub struct CsvOutputAdapter {
    writer: Mutex<csv::Writer<File>>,
    file_path: PathBuf,
}

/// `addresses-output-YYYYmmdd_HHMMSS.csv` inside `dir`.
pub fn output_file_path(dir: &Path, at: DateTime<Local>) -> PathBuf {
    dir.join(format!("{}{}.csv", OUTPUT_FILE_PREFIX, at.format("%Y%m%d_%H%M%S")))
}

impl CsvOutputAdapter {
    /// Creates a timestamped output file in `dir`.
    pub fn create_in(dir: &Path) -> anyhow::Result<Self> {
        Self::create(&output_file_path(dir, Local::now()))
    }

    pub fn create(file_path: &Path) -> anyhow::Result<Self> {
        let dir = file_path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(dir)?;

        info!("Creating output file: {}", file_path.display());

        let file = File::create(file_path)
            .with_context(|| format!("Failed to create output file {}", file_path.display()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);
        // Written up front so a run without matches still produces a readable file
        writer.write_record(OUTPUT_COLUMNS)?;

        Ok(Self {
            writer: Mutex::new(writer),
            file_path: file_path.to_path_buf(),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

pub const OUTPUT_COLUMNS: [&str; 12] = [
    "street",
    "apt_num",
    "city",
    "state",
    "zipcode",
    "census_year",
    "latitude",
    "longitude",
    "fips",
    "adi_version",
    "adi_state",
    "adi_national",
];

#[async_trait::async_trait]
impl OutputRowPort for CsvOutputAdapter {
    async fn write_row(&self, row: &OutputRow) -> anyhow::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow!("output writer lock poisoned"))?;
        writer.serialize(row)?;
        Ok(())
    }

    async fn finish(&self) -> anyhow::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow!("output writer lock poisoned"))?;
        writer.flush()?;
        Ok(())
    }
}
