//! CSV Data Loader Module
//! Loads the sales CSV once from a local path or URL and normalises its schema using Polars.

use super::record::{columns, SalesTable};
use polars::prelude::*;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("CSV is missing required column '{0}'")]
    MissingColumn(String),
    #[error("Column '{column}' cannot be read as {dtype}: {source}")]
    InvalidColumn {
        column: String,
        dtype: DataType,
        #[source]
        source: PolarsError,
    },
}

/// Where the sales CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` locations are URLs, anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Column name and the type it is normalised to.
fn schema() -> [(&'static str, DataType); 6] {
    [
        (columns::YEAR, DataType::Int64),
        (columns::MONTH, DataType::String),
        (columns::VEHICLE_TYPE, DataType::String),
        (columns::AUTOMOBILE_SALES, DataType::Float64),
        (columns::ADVERTISING_EXPENDITURE, DataType::Float64),
        (columns::RECESSION, DataType::Int64),
    ]
}

/// Handles CSV loading with Polars.
pub struct DataLoader {
    infer_schema_length: usize,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            infer_schema_length: 10000,
        }
    }

    /// Load and normalise the dataset from any supported source.
    pub fn load(&self, source: &DataSource) -> Result<SalesTable, LoaderError> {
        match source {
            DataSource::Path(path) => self.load_csv(path),
            DataSource::Url(url) => self.load_url(url),
        }
    }

    /// Load a CSV file from disk.
    pub fn load_csv(&self, file_path: &Path) -> Result<SalesTable, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(self.infer_schema_length))
            .finish()?
            .collect()?;
        Self::normalize(df)
    }

    /// Download a CSV over HTTP(S) and parse it in memory.
    pub fn load_url(&self, url: &str) -> Result<SalesTable, LoaderError> {
        let bytes = reqwest::blocking::get(url)
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(|source| LoaderError::Download {
                url: url.to_string(),
                source,
            })?;
        self.load_bytes(bytes.to_vec())
    }

    /// Parse CSV content already held in memory.
    pub fn load_bytes(&self, bytes: Vec<u8>) -> Result<SalesTable, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(self.infer_schema_length))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;
        Self::normalize(df)
    }

    /// Keep only the six dataset columns, strictly cast to their normalised types.
    fn normalize(raw: DataFrame) -> Result<SalesTable, LoaderError> {
        let mut normalized = Vec::with_capacity(columns::ALL.len());
        for (name, dtype) in schema() {
            let column = raw
                .column(name)
                .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
            let cast = column
                .as_materialized_series()
                .strict_cast(&dtype)
                .map(Column::from)
                .map_err(|source| LoaderError::InvalidColumn {
                    column: name.to_string(),
                    dtype: dtype.clone(),
                    source,
                })?;
            normalized.push(cast);
        }
        Ok(SalesTable::from_normalized(DataFrame::new(normalized)?))
    }
}
