/// Record filtering for the map and list views.
///
/// `apply` is a pure function: it never reorders or modifies records, it only
/// drops the ones that fail any of the three criteria.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::model::EarthquakeRecord;

/// User-chosen criteria. All three must hold for a record to pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub min_magnitude: f64,
    pub max_distance_km: f64,
    pub earliest: DateTime<Utc>,
}

impl FilterCriteria {
    /// Builds criteria whose time bound is `lookback_days` before `now`.
    pub fn with_lookback(
        min_magnitude: f64,
        max_distance_km: f64,
        lookback_days: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            min_magnitude,
            max_distance_km,
            earliest: now - Duration::days(i64::from(lookback_days)),
        }
    }

    pub fn matches(&self, record: &EarthquakeRecord) -> bool {
        record.magnitude() >= self.min_magnitude
            && record.distance_to_reference_km() <= self.max_distance_km
            && record.occurred_at() >= self.earliest
    }
}

/// Returns the records that satisfy `criteria`, in their original order.
pub fn apply(records: &[EarthquakeRecord], criteria: &FilterCriteria) -> Vec<EarthquakeRecord> {
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}
