use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ADI file '{file}' is missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

/// Format failures for census identifiers. These abandon a single lookup and never
/// abort a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FipsError {
    #[error("invalid FIPS length: {0} (expected 12-, 14-, or 15-char long FIPS code)")]
    InvalidLength(usize),

    #[error("failed to convert GISJOIN '{0}' to FIPS")]
    InvalidGisjoin(String),
}

pub type Result<T> = std::result::Result<T, AdiError>;
