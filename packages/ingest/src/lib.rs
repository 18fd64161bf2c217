#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for ingesting FIR incident data from CSV exports.
//!
//! Parses the district/coordinate/incident-type columns out of a police
//! FIR dataset export and materializes one [`IncidentRecord`] per row with
//! valid coordinates. Rows whose latitude or longitude is missing or
//! unparseable are dropped here, before any downstream stage sees them.

pub mod progress;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use fir_map_incident_models::IncidentRecord;
use progress::ProgressCallback;
use thiserror::Error;

/// Header name of the district column.
pub const COLUMN_DISTRICT: &str = "District_Name";

/// Header name of the latitude column.
pub const COLUMN_LATITUDE: &str = "Latitude";

/// Header name of the longitude column.
pub const COLUMN_LONGITUDE: &str = "Longitude";

/// Header name of the incident type column.
pub const COLUMN_FIR_TYPE: &str = "FIR Type";

/// Errors that can occur while loading incident data.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The CSV file could not be opened or read.
    #[error("Failed to read incident CSV: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV content could not be parsed.
    #[error("Failed to parse incident CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column '{name}'")]
    MissingColumn {
        /// Header name of the absent column.
        name: &'static str,
    },
}

/// Positions of the four required columns within the header row.
struct ColumnIndexes {
    district: usize,
    latitude: usize,
    longitude: usize,
    fir_type: usize,
}

fn locate_columns(headers: &csv::StringRecord) -> Result<ColumnIndexes, IngestError> {
    let find = |name: &'static str| {
        headers
            .iter()
            .position(|header| header.trim() == name)
            .ok_or(IngestError::MissingColumn { name })
    };

    Ok(ColumnIndexes {
        district: find(COLUMN_DISTRICT)?,
        latitude: find(COLUMN_LATITUDE)?,
        longitude: find(COLUMN_LONGITUDE)?,
        fir_type: find(COLUMN_FIR_TYPE)?,
    })
}

/// Parses a coordinate cell. Empty, unparseable, and non-finite values all
/// count as missing, since the export writes nulls as empty cells.
#[must_use]
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses incident records from CSV content.
///
/// Rows missing either coordinate are dropped and counted; the dropped
/// count is logged once the read completes. Record order follows file
/// order.
///
/// # Errors
///
/// Returns an error if the content is not valid CSV or a required column
/// is absent from the header row.
pub fn read_incidents(
    reader: impl Read,
    progress: Option<Arc<dyn ProgressCallback>>,
) -> Result<Vec<IncidentRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let indexes = locate_columns(csv_reader.headers()?)?;

    let mut records = Vec::new();
    let mut dropped: u64 = 0;

    for result in csv_reader.records() {
        let row = result?;
        let field = |index: usize| row.get(index).unwrap_or("").trim();

        let Some(latitude) = parse_coordinate(field(indexes.latitude)) else {
            dropped += 1;
            continue;
        };
        let Some(longitude) = parse_coordinate(field(indexes.longitude)) else {
            dropped += 1;
            continue;
        };

        records.push(IncidentRecord {
            district: field(indexes.district).to_owned(),
            latitude,
            longitude,
            fir_type: field(indexes.fir_type).to_owned(),
        });

        if let Some(progress) = &progress {
            progress.inc(1);
        }
    }

    log::info!(
        "Loaded {} incidents ({dropped} rows dropped for missing coordinates)",
        records.len()
    );

    Ok(records)
}

/// Loads incident records from a CSV file on disk.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, is not valid CSV, or a
/// required column is absent from the header row.
pub fn load_incidents(
    path: impl AsRef<Path>,
    progress: Option<Arc<dyn ProgressCallback>>,
) -> Result<Vec<IncidentRecord>, IngestError> {
    let path = path.as_ref();
    log::debug!("Reading incident CSV from {}", path.display());
    let file = File::open(path)?;
    read_incidents(BufReader::new(file), progress)
}
