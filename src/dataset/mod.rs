//! Launch dataset loading and validation.
//!
//! Reads the CSV of launch records once at startup and turns it into the
//! immutable [`LaunchDataset`] everything else computes from. A file that
//! cannot be loaded in full is a startup failure, never a runtime one.

use crate::models::{LaunchDataset, LaunchRecord, Outcome};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Columns the input file must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "Launch Site",
    "Payload Mass (kg)",
    "class",
    "Booster Version Category",
];

/// Errors raised while loading the launch dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot open dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset {} is not readable as CSV: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("dataset {} is missing required column \"{column}\"", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("dataset {} line {row}: {message}", .path.display())]
    Row {
        path: PathBuf,
        row: usize,
        message: String,
    },
    #[error("dataset {} line {row}: class must be 0 or 1, got {class}", .path.display())]
    BadOutcome { path: PathBuf, row: usize, class: i64 },
    #[error("dataset {} contains no launch records", .path.display())]
    Empty { path: PathBuf },
}

/// One CSV row as it appears in the input file.
///
/// `class` is widened to `i64` so out-of-range values surface as
/// [`DatasetError::BadOutcome`] instead of a generic parse failure.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

/// Loads and validates the launch dataset from a CSV file.
///
/// Fails on the first malformed row rather than skipping it, and rejects
/// an empty dataset since the dashboard's payload bounds would be
/// undefined.
pub fn load(path: &Path) -> Result<LaunchDataset, DatasetError> {
    info!("Loading launch dataset from {}", path.display());

    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| DatasetError::Malformed {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<CsvRow>().enumerate() {
        // The header occupies line 1, so data rows start at line 2.
        let line = idx + 2;

        let row = row.map_err(|source| DatasetError::Row {
            path: path.to_path_buf(),
            row: line,
            message: source.to_string(),
        })?;

        if !row.payload_mass_kg.is_finite() {
            return Err(DatasetError::Row {
                path: path.to_path_buf(),
                row: line,
                message: format!("payload mass {} is not finite", row.payload_mass_kg),
            });
        }

        let outcome =
            Outcome::from_class(row.class).ok_or_else(|| DatasetError::BadOutcome {
                path: path.to_path_buf(),
                row: line,
                class: row.class,
            })?;

        records.push(LaunchRecord {
            site: row.launch_site,
            payload_mass_kg: row.payload_mass_kg,
            outcome,
            booster_category: row.booster_category,
        });
    }

    let dataset = LaunchDataset::from_records(records).ok_or_else(|| DatasetError::Empty {
        path: path.to_path_buf(),
    })?;

    debug!(
        "Loaded {} records across {} sites, payload {:?} kg",
        dataset.records().len(),
        dataset.sites().len(),
        dataset.payload_bounds()
    );

    Ok(dataset)
}
