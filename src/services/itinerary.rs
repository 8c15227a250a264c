// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Itinerary loading and route validation service.

use crate::models::stop::Stop;
use std::fs;
use std::path::Path;

/// Number of synthetic stops seeded when no itinerary file exists.
const PLACEHOLDER_STOP_COUNT: u32 = 27;

/// Base coordinates for the placeholder route; each stop is offset by a
/// fixed step per id.
const PLACEHOLDER_BASE_LAT: f64 = 34.0522;
const PLACEHOLDER_BASE_LNG: f64 = -118.2437;
const PLACEHOLDER_COORD_STEP: f64 = 0.001;

/// The ordered, immutable sequence of tour stops.
///
/// Loaded once at startup; stop ids are validated to form the contiguous
/// range `1..=N` so that id order defines the route.
#[derive(Debug, Clone)]
pub struct ItineraryService {
    stops: Vec<Stop>,
}

impl ItineraryService {
    /// Load the itinerary from a JSON file, seeding the placeholder route
    /// first if the file does not exist.
    ///
    /// Seeding writes the generated stops to `path` so subsequent runs load
    /// identical data.
    pub fn load_or_seed<P: AsRef<Path>>(path: P) -> Result<Self, ItineraryError> {
        let path = path.as_ref();

        if !path.exists() {
            let stops = placeholder_stops();
            let json = serde_json::to_string_pretty(&stops)
                .map_err(|e| ItineraryError::ParseError(e.to_string()))?;
            fs::write(path, json).map_err(|e| ItineraryError::IoError(e.to_string()))?;
            tracing::info!(
                path = %path.display(),
                count = stops.len(),
                "Seeded placeholder itinerary"
            );
        }

        Self::load_from_file(path)
    }

    /// Load the itinerary from a JSON file of stop records.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ItineraryError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| ItineraryError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load the itinerary from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, ItineraryError> {
        let stops: Vec<Stop> = serde_json::from_str(json_data)
            .map_err(|e| ItineraryError::ParseError(e.to_string()))?;
        Self::from_stops(stops)
    }

    /// Build an itinerary from in-memory stops, validating the route.
    pub fn from_stops(mut stops: Vec<Stop>) -> Result<Self, ItineraryError> {
        if stops.is_empty() {
            return Err(ItineraryError::InvalidRoute(
                "itinerary must contain at least one stop".to_string(),
            ));
        }

        stops.sort_by_key(|s| s.id);

        for (index, stop) in stops.iter().enumerate() {
            let expected = index as u32 + 1;
            if stop.id != expected {
                return Err(ItineraryError::InvalidRoute(format!(
                    "stop ids must be contiguous from 1; expected {} but found {} ({})",
                    expected, stop.id, stop.name
                )));
            }
        }

        Ok(Self { stops })
    }

    /// The default 27-stop synthetic route.
    pub fn placeholder() -> Self {
        // Contiguity holds by construction
        Self {
            stops: placeholder_stops(),
        }
    }

    /// Get the ordered list of stops.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Look up a stop by id.
    pub fn get(&self, stop_id: u32) -> Option<&Stop> {
        let index = stop_id.checked_sub(1)? as usize;
        self.stops.get(index)
    }

    /// Number of stops on the route.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Generate the deterministic placeholder route.
fn placeholder_stops() -> Vec<Stop> {
    (1..=PLACEHOLDER_STOP_COUNT)
        .map(|id| Stop {
            id,
            name: format!("Heritage Building {}", id),
            course: format!("Course in History {}", id),
            lat: PLACEHOLDER_BASE_LAT + id as f64 * PLACEHOLDER_COORD_STEP,
            lng: PLACEHOLDER_BASE_LNG + id as f64 * PLACEHOLDER_COORD_STEP,
            info: format!("This is some information about building {}.", id),
        })
        .collect()
}

/// Errors from itinerary operations.
#[derive(Debug, thiserror::Error)]
pub enum ItineraryError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse itinerary JSON: {0}")]
    ParseError(String),

    #[error("Invalid tour route: {0}")]
    InvalidRoute(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_stop(id: u32) -> Stop {
        Stop {
            id,
            name: format!("Building {}", id),
            course: format!("Course {}", id),
            lat: 34.0 + id as f64 * 0.01,
            lng: -118.0,
            info: String::new(),
        }
    }

    #[test]
    fn placeholder_matches_legacy_seed_data() {
        let itinerary = ItineraryService::placeholder();

        assert_eq!(itinerary.len(), 27);

        let first = itinerary.get(1).unwrap();
        assert_eq!(first.name, "Heritage Building 1");
        assert_eq!(first.course, "Course in History 1");
        assert!((first.lat - 34.0532).abs() < 1e-9);
        assert!((first.lng - -118.2427).abs() < 1e-9);
        assert_eq!(first.info, "This is some information about building 1.");

        let last = itinerary.get(27).unwrap();
        assert_eq!(last.name, "Heritage Building 27");
        assert!((last.lat - 34.0792).abs() < 1e-9);
        assert!((last.lng - -118.2167).abs() < 1e-9);

        assert!(itinerary.get(28).is_none());
        assert!(itinerary.get(0).is_none());
    }

    #[test]
    fn loads_legacy_building_records() {
        let json = r#"[
            {"id": 1, "name": "Founders Hall", "course": "Rhetoric", "lat": 34.05, "lng": -118.24, "info": "First."},
            {"id": 2, "name": "Old Gymnasium", "course": "Physical Culture", "lat": 34.06, "lng": -118.25, "info": "Second."}
        ]"#;

        let itinerary = ItineraryService::load_from_json(json).unwrap();

        assert_eq!(itinerary.len(), 2);
        assert_eq!(itinerary.get(2).unwrap().name, "Old Gymnasium");
    }

    #[test]
    fn out_of_order_records_are_sorted_by_id() {
        let itinerary =
            ItineraryService::from_stops(vec![make_stop(3), make_stop(1), make_stop(2)]).unwrap();

        let ids: Vec<u32> = itinerary.stops().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn gap_in_ids_is_rejected() {
        let err =
            ItineraryService::from_stops(vec![make_stop(1), make_stop(3)]).unwrap_err();
        assert!(matches!(err, ItineraryError::InvalidRoute(_)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err =
            ItineraryService::from_stops(vec![make_stop(1), make_stop(1)]).unwrap_err();
        assert!(matches!(err, ItineraryError::InvalidRoute(_)));
    }

    #[test]
    fn ids_not_starting_at_one_are_rejected() {
        let err = ItineraryService::from_stops(vec![make_stop(2), make_stop(3)]).unwrap_err();
        assert!(matches!(err, ItineraryError::InvalidRoute(_)));
    }

    #[test]
    fn empty_itinerary_is_rejected() {
        let err = ItineraryService::from_stops(vec![]).unwrap_err();
        assert!(matches!(err, ItineraryError::InvalidRoute(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = ItineraryService::load_from_json("{not json").unwrap_err();
        assert!(matches!(err, ItineraryError::ParseError(_)));
    }

    #[test]
    fn load_or_seed_writes_the_placeholder_file() {
        let path = std::env::temp_dir().join(format!(
            "heritage_tour_seed_test_{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let seeded = ItineraryService::load_or_seed(&path).unwrap();
        assert_eq!(seeded.len(), 27);
        assert!(path.exists());

        // A second load reads back identical data
        let reloaded = ItineraryService::load_from_file(&path).unwrap();
        assert_eq!(reloaded.stops(), seeded.stops());

        fs::remove_file(&path).unwrap();
    }
}
