#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District-level analytics over loaded FIR incident records.
//!
//! Provides district selection, the map-center centroid, and the hotspot
//! aggregation (the exact coordinate pair with the most incidents and the
//! dominant incident type there). All functions operate on the in-memory
//! record slice produced by `fir_map_ingest`; nothing is persisted.

use std::collections::{BTreeMap, HashMap};

use fir_map_incident_models::{Hotspot, IncidentRecord};
use geo::{Centroid, MultiPoint, Point};

/// Result of looking up a district by name.
#[derive(Debug)]
pub enum DistrictQuery<'a> {
    /// The name is absent from the dataset's distinct district values.
    NotFound,
    /// The name exists but matched zero rows.
    NoData,
    /// Matching rows, in load order.
    Found(Vec<&'a IncidentRecord>),
}

/// Selects the incidents of one district.
///
/// The requested name is trimmed of surrounding whitespace; matching
/// against `District_Name` is otherwise exact, including case.
#[must_use]
pub fn select_district<'a>(records: &'a [IncidentRecord], name: &str) -> DistrictQuery<'a> {
    let name = name.trim();

    if !records.iter().any(|record| record.district == name) {
        return DistrictQuery::NotFound;
    }

    let rows: Vec<&IncidentRecord> = records
        .iter()
        .filter(|record| record.district == name)
        .collect();

    // Only reachable if the membership test and this filter ever disagree.
    if rows.is_empty() {
        return DistrictQuery::NoData;
    }

    log::debug!("Selected {} incidents for district '{name}'", rows.len());
    DistrictQuery::Found(rows)
}

/// Returns incident counts per district, ordered by district name.
#[must_use]
pub fn district_counts(records: &[IncidentRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.district.clone()).or_insert(0) += 1;
    }
    counts
}

/// Returns the sorted, deduplicated list of district names in the dataset.
#[must_use]
pub fn district_names(records: &[IncidentRecord]) -> Vec<String> {
    district_counts(records).into_keys().collect()
}

/// Computes the arithmetic mean coordinate of the given incidents.
///
/// Returns `None` for an empty slice. The point is (longitude, latitude)
/// in `geo`'s (x, y) convention.
#[must_use]
pub fn centroid(records: &[&IncidentRecord]) -> Option<Point<f64>> {
    let points: MultiPoint<f64> = records
        .iter()
        .map(|record| Point::new(record.longitude, record.latitude))
        .collect();
    points.centroid()
}

/// Per-coordinate tally used by the hotspot aggregation.
struct PairTally {
    count: usize,
    first_seen: usize,
}

/// Finds the exact coordinate pair with the most incidents, and the most
/// frequent incident type at that pair.
///
/// Coordinates group by bit-pattern equality (see
/// [`IncidentRecord::coordinate_bits`]). Ties for the pair and for the
/// type both break toward the earliest occurrence in load order, so the
/// result is deterministic for a given input file. Returns `None` for an
/// empty slice.
#[must_use]
pub fn hotspot(records: &[&IncidentRecord]) -> Option<Hotspot> {
    let mut pairs: HashMap<(u64, u64), PairTally> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        pairs
            .entry(record.coordinate_bits())
            .or_insert_with(|| PairTally {
                count: 0,
                first_seen: index,
            })
            .count += 1;
    }

    let (&winner, tally) = pairs
        .iter()
        .max_by_key(|(_, tally)| (tally.count, std::cmp::Reverse(tally.first_seen)))?;

    let mut types: HashMap<&str, PairTally> = HashMap::new();
    for (index, record) in records
        .iter()
        .filter(|record| record.coordinate_bits() == winner)
        .enumerate()
    {
        types
            .entry(record.fir_type.as_str())
            .or_insert_with(|| PairTally {
                count: 0,
                first_seen: index,
            })
            .count += 1;
    }

    let (&dominant_type, type_tally) = types
        .iter()
        .max_by_key(|(_, tally)| (tally.count, std::cmp::Reverse(tally.first_seen)))?;

    Some(Hotspot {
        latitude: f64::from_bits(winner.0),
        longitude: f64::from_bits(winner.1),
        count: tally.count,
        dominant_type: dominant_type.to_owned(),
        dominant_type_count: type_tally.count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(district: &str, latitude: f64, longitude: f64, fir_type: &str) -> IncidentRecord {
        IncidentRecord {
            district: district.to_owned(),
            latitude,
            longitude,
            fir_type: fir_type.to_owned(),
        }
    }

    fn refs(records: &[IncidentRecord]) -> Vec<&IncidentRecord> {
        records.iter().collect()
    }

    #[test]
    fn selects_exactly_the_matching_rows() {
        let records = vec![
            record("Mysuru", 12.0, 76.0, "Theft"),
            record("Bengaluru City", 13.0, 77.0, "Assault"),
            record("Mysuru", 12.5, 76.5, "Robbery"),
        ];

        let DistrictQuery::Found(rows) = select_district(&records, "Mysuru") else {
            panic!("expected Found");
        };
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.district == "Mysuru"));
    }

    #[test]
    fn trims_the_requested_name() {
        let records = vec![record("Mysuru", 12.0, 76.0, "Theft")];
        assert!(matches!(
            select_district(&records, "  Mysuru  "),
            DistrictQuery::Found(_)
        ));
    }

    #[test]
    fn unknown_district_is_not_found() {
        let records = vec![record("Mysuru", 12.0, 76.0, "Theft")];
        assert!(matches!(
            select_district(&records, "Gotham"),
            DistrictQuery::NotFound
        ));
    }

    #[test]
    fn matching_is_case_exact() {
        let records = vec![record("Mysuru", 12.0, 76.0, "Theft")];
        assert!(matches!(
            select_district(&records, "mysuru"),
            DistrictQuery::NotFound
        ));
    }

    #[test]
    fn counts_districts_in_name_order() {
        let records = vec![
            record("Mysuru", 12.0, 76.0, "Theft"),
            record("Bengaluru City", 13.0, 77.0, "Assault"),
            record("Mysuru", 12.5, 76.5, "Robbery"),
        ];
        let counts = district_counts(&records);
        assert_eq!(
            counts.into_iter().collect::<Vec<_>>(),
            vec![
                ("Bengaluru City".to_owned(), 1),
                ("Mysuru".to_owned(), 2)
            ]
        );
    }

    #[test]
    fn centroid_is_the_arithmetic_mean() {
        let records = vec![
            record("Mysuru", 10.0, 20.0, "Theft"),
            record("Mysuru", 12.0, 22.0, "Theft"),
        ];
        let rows = refs(&records);
        let center = centroid(&rows).unwrap();
        assert!((center.y() - 11.0).abs() < f64::EPSILON);
        assert!((center.x() - 21.0).abs() < f64::EPSILON);
    }

    #[test]
    fn centroid_of_nothing_is_none() {
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn hotspot_picks_the_busiest_pair_and_its_dominant_type() {
        let records = vec![
            record("Mysuru", 10.0, 20.0, "Theft"),
            record("Mysuru", 10.0, 20.0, "Theft"),
            record("Mysuru", 10.0, 20.0, "Assault"),
            record("Mysuru", 11.0, 21.0, "Theft"),
        ];
        let rows = refs(&records);
        let spot = hotspot(&rows).unwrap();

        assert!((spot.latitude - 10.0).abs() < f64::EPSILON);
        assert!((spot.longitude - 20.0).abs() < f64::EPSILON);
        assert_eq!(spot.count, 3);
        assert_eq!(spot.dominant_type, "Theft");
        assert_eq!(spot.dominant_type_count, 2);
    }

    #[test]
    fn hotspot_pair_ties_break_toward_first_occurrence() {
        let records = vec![
            record("Mysuru", 11.0, 21.0, "Theft"),
            record("Mysuru", 10.0, 20.0, "Assault"),
            record("Mysuru", 11.0, 21.0, "Theft"),
            record("Mysuru", 10.0, 20.0, "Assault"),
        ];
        let rows = refs(&records);
        let spot = hotspot(&rows).unwrap();
        assert!((spot.latitude - 11.0).abs() < f64::EPSILON);
        assert!((spot.longitude - 21.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hotspot_type_ties_break_toward_first_occurrence() {
        let records = vec![
            record("Mysuru", 10.0, 20.0, "Assault"),
            record("Mysuru", 10.0, 20.0, "Theft"),
        ];
        let rows = refs(&records);
        let spot = hotspot(&rows).unwrap();
        assert_eq!(spot.dominant_type, "Assault");
        assert_eq!(spot.dominant_type_count, 1);
    }

    #[test]
    fn hotspot_of_nothing_is_none() {
        assert!(hotspot(&[]).is_none());
    }

    #[test]
    fn near_equal_coordinates_stay_separate_pairs() {
        let records = vec![
            record("Mysuru", 10.000_000_1, 20.0, "Theft"),
            record("Mysuru", 10.000_000_2, 20.0, "Theft"),
            record("Mysuru", 10.000_000_2, 20.0, "Theft"),
        ];
        let rows = refs(&records);
        let spot = hotspot(&rows).unwrap();
        assert_eq!(spot.count, 2);
        assert!((spot.latitude - 10.000_000_2).abs() < f64::EPSILON);
    }
}
