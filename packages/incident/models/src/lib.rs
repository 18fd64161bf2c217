#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Incident record and hotspot result types for the FIR map toolchain.
//!
//! This crate defines the shared in-memory representation of a crime
//! incident loaded from an FIR dataset. Every record carries valid
//! coordinates: rows missing latitude or longitude are dropped at load
//! time and never construct an [`IncidentRecord`].

use serde::{Deserialize, Serialize};

/// A single crime incident with validated coordinates.
///
/// Immutable once loaded; the ingestion layer only constructs records
/// whose latitude and longitude both parsed as finite numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// District the incident was reported in (`District_Name` column).
    pub district: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Recorded incident category (`FIR Type` column).
    pub fir_type: String,
}

impl IncidentRecord {
    /// Returns the coordinate pair as raw bit patterns.
    ///
    /// Two records share a location exactly when their bit patterns match,
    /// which is the grouping key the hotspot aggregation uses. Bit equality
    /// is stricter than `==` on floats (`-0.0` and `0.0` group separately)
    /// and, unlike floats, is hashable.
    #[must_use]
    pub const fn coordinate_bits(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }
}

/// The location with the most incidents within a district, plus the most
/// frequent incident type at that exact location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Latitude of the winning coordinate pair.
    pub latitude: f64,
    /// Longitude of the winning coordinate pair.
    pub longitude: f64,
    /// Number of incidents recorded at this exact pair.
    pub count: usize,
    /// Most frequent `FIR Type` among incidents at this pair.
    pub dominant_type: String,
    /// How many of the incidents at this pair share the dominant type.
    pub dominant_type_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(latitude: f64, longitude: f64) -> IncidentRecord {
        IncidentRecord {
            district: "Bengaluru City".to_owned(),
            latitude,
            longitude,
            fir_type: "Theft".to_owned(),
        }
    }

    #[test]
    fn identical_coordinates_share_bits() {
        assert_eq!(
            record(12.9716, 77.5946).coordinate_bits(),
            record(12.9716, 77.5946).coordinate_bits()
        );
    }

    #[test]
    fn nearby_coordinates_do_not_share_bits() {
        assert_ne!(
            record(12.9716, 77.5946).coordinate_bits(),
            record(12.9716, 77.5947).coordinate_bits()
        );
    }

    #[test]
    fn swapped_lat_lng_do_not_share_bits() {
        assert_ne!(
            record(12.0, 77.0).coordinate_bits(),
            record(77.0, 12.0).coordinate_bits()
        );
    }
}
