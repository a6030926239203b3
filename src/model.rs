/// Core data types for the Istanbul seismic early-warning service.
///
/// This module defines the shared domain model imported by all other modules:
/// coordinates, the normalized earthquake record, and the error types raised
/// while fetching or building records. It performs no I/O.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::geo::distance_km;

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when both components are finite and inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Earthquake record
// ---------------------------------------------------------------------------

/// Label used when a feed gives no usable place description.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// One normalized seismic event, as produced by a source adapter.
///
/// Records are immutable values. `distance_to_reference_km` is derived from
/// the epicentre and the reference point at construction time and cannot be
/// set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeRecord {
    occurred_at: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    depth_km: f64,
    magnitude: f64,
    location_label: String,
    distance_to_reference_km: f64,
}

impl EarthquakeRecord {
    /// Builds a record and computes its epicentral distance to `reference`.
    ///
    /// Negative depths (events reported above the datum) are clamped to 0 km.
    ///
    /// # Errors
    /// - `RecordError::InvalidCoordinate` - latitude/longitude out of range.
    /// - `RecordError::NonFinite` - depth or magnitude is NaN or infinite.
    pub fn new(
        occurred_at: DateTime<Utc>,
        epicentre: Coordinate,
        depth_km: f64,
        magnitude: f64,
        location_label: impl Into<String>,
        reference: Coordinate,
    ) -> Result<Self, RecordError> {
        if !epicentre.is_valid() {
            return Err(RecordError::InvalidCoordinate {
                latitude: epicentre.latitude,
                longitude: epicentre.longitude,
            });
        }
        if !depth_km.is_finite() {
            return Err(RecordError::NonFinite("depth"));
        }
        if !magnitude.is_finite() {
            return Err(RecordError::NonFinite("magnitude"));
        }

        let label = location_label.into();
        let label = if label.trim().is_empty() {
            UNKNOWN_LOCATION.to_string()
        } else {
            label.trim().to_string()
        };

        Ok(Self {
            occurred_at,
            latitude: epicentre.latitude,
            longitude: epicentre.longitude,
            depth_km: depth_km.max(0.0),
            magnitude,
            location_label: label,
            distance_to_reference_km: distance_km(epicentre, reference),
        })
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn epicentre(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn depth_km(&self) -> f64 {
        self.depth_km
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn location_label(&self) -> &str {
        &self.location_label
    }

    pub fn distance_to_reference_km(&self) -> f64 {
        self.distance_to_reference_km
    }

    /// Wall-clock time elapsed between the event and `now`.
    pub fn elapsed_since(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.occurred_at
    }
}

/// Sorts records most-recent-first. Stable, so equal timestamps keep feed order.
pub fn sort_most_recent_first(records: &mut [EarthquakeRecord]) {
    records.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Reasons a single record could not be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("coordinate out of range: ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
}

/// Errors that can arise when fetching or decoding an upstream feed.
///
/// These never escape a source adapter's public `fetch`; they are logged and
/// turned into an empty result there.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network failure, timeout, or client construction failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx HTTP response from the upstream service.
    #[error("HTTP error: {0}")]
    HttpStatus(u16),
    /// The response body could not be understood at the top level.
    #[error("parse error: {0}")]
    Parse(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
