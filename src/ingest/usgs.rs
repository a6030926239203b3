/// USGS FDSN event service client (secondary feed).
///
/// Handles URL construction and GeoJSON response parsing for:
///   https://earthquake.usgs.gov/fdsnws/event/1/query
///
/// Queries a fixed 500 km radius around the reference point over the last
/// 30 days, magnitude 2.5 and up. See `fixtures.rs` for the response shape.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::ingest::{not_after, SourceAdapter};
use crate::model::{sort_most_recent_first, Coordinate, EarthquakeRecord, FeedError, UNKNOWN_LOCATION};

// ---------------------------------------------------------------------------
// Serde structures for GeoJSON deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    properties: Properties,
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct Properties {
    mag: Option<f64>,
    place: Option<String>,
    time: Option<i64>, // epoch milliseconds
}

#[derive(Deserialize)]
struct Geometry {
    coordinates: Vec<f64>, // [longitude, latitude, depth_km]
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

pub const USGS_QUERY_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

pub const LOOKBACK_DAYS: i64 = 30;
pub const MIN_MAGNITUDE: f64 = 2.5;
pub const MAX_RADIUS_KM: f64 = 500.0;

/// Request timeout, in seconds. The feed has no natural bound, so one is imposed.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Builds the FDSN query URL for events within `MAX_RADIUS_KM` of `center`
/// during the `LOOKBACK_DAYS` before `now`.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use seismon_service::ingest::usgs::{build_query_url, USGS_QUERY_URL};
/// use seismon_service::locations::REFERENCE_POINT;
///
/// let url = build_query_url(USGS_QUERY_URL, REFERENCE_POINT, Utc::now());
/// assert!(url.contains("format=geojson"));
/// ```
pub fn build_query_url(base_url: &str, center: Coordinate, now: DateTime<Utc>) -> String {
    let start = now - Duration::days(LOOKBACK_DAYS);

    format!(
        "{}?format=geojson&starttime={}&endtime={}&minmagnitude={}&latitude={}&longitude={}&maxradiuskm={}",
        base_url,
        start.format(ISO_FORMAT),
        now.format(ISO_FORMAT),
        MIN_MAGNITUDE,
        center.latitude,
        center.longitude,
        MAX_RADIUS_KM
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Everything the parser got out of one feature collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFeed {
    /// Most-recent-first.
    pub records: Vec<EarthquakeRecord>,
    /// Features that were dropped.
    pub skipped: usize,
}

fn feature_to_record(
    feature: Feature,
    reference: Coordinate,
    now: DateTime<Utc>,
) -> Result<EarthquakeRecord, String> {
    let magnitude = feature.properties.mag.ok_or("missing magnitude")?;
    let millis = feature.properties.time.ok_or("missing time")?;
    let occurred_at = Utc
        .timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| format!("time {} out of range", millis))?;
    let occurred_at = not_after(occurred_at, now).ok_or_else(|| format!("time {} is in the future", occurred_at))?;

    let coords = feature.geometry.map(|g| g.coordinates).unwrap_or_default();
    let [longitude, latitude, depth_km] = coords[..] else {
        return Err(format!("expected 3 coordinates, got {}", coords.len()));
    };

    EarthquakeRecord::new(
        occurred_at,
        Coordinate::new(latitude, longitude),
        depth_km,
        magnitude,
        feature.properties.place.unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        reference,
    )
    .map_err(|e| e.to_string())
}

/// Parses an FDSN GeoJSON response body.
///
/// # Errors
/// `FeedError::Parse` when the body is not a feature collection at all.
/// Individual unusable features are skipped and counted instead.
pub fn parse_feature_collection(
    json: &str,
    reference: Coordinate,
    now: DateTime<Utc>,
) -> Result<ParsedFeed, FeedError> {
    let collection: FeatureCollection = serde_json::from_str(json)
        .map_err(|e| FeedError::Parse(format!("JSON deserialization failed: {}", e)))?;

    let mut parsed = ParsedFeed::default();
    for feature in collection.features {
        match feature_to_record(feature, reference, now) {
            Ok(record) => parsed.records.push(record),
            Err(reason) => {
                debug!(%reason, "skipping USGS feature");
                parsed.skipped += 1;
            }
        }
    }

    sort_most_recent_first(&mut parsed.records);
    Ok(parsed)
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// Secondary source adapter.
pub struct UsgsAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
    reference: Coordinate,
}

impl UsgsAdapter {
    /// # Errors
    /// `FeedError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64, reference: Coordinate) -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            reference,
        })
    }

    fn try_fetch(&self, now: DateTime<Utc>) -> Result<ParsedFeed, FeedError> {
        let url = build_query_url(&self.base_url, self.reference, now);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()?;

        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }

        let body = response.text()?;
        parse_feature_collection(&body, self.reference, now)
    }
}

impl SourceAdapter for UsgsAdapter {
    fn name(&self) -> &'static str {
        "usgs"
    }

    fn fetch(&self, now: DateTime<Utc>) -> Vec<EarthquakeRecord> {
        match self.try_fetch(now) {
            Ok(parsed) => {
                info!(
                    records = parsed.records.len(),
                    skipped = parsed.skipped,
                    "fetched USGS feature collection"
                );
                parsed.records
            }
            Err(e) => {
                warn!(error = %e, "USGS fetch failed");
                Vec::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
