/// Early-warning classification over the full record sequence.
///
/// Two independent derivations, both recomputed every cycle from the
/// unfiltered, most-recent-first sequence:
///
/// - **Recent strong events**: at most three events that are strong, close,
///   and less than a day old. Any hit puts the display into the alert state.
/// - **Aggregate regional risk**: mean risk score over the last week's
///   events (from the 50 most recent), mapped to a tier.
///
/// The user-facing filters never affect either result.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::analysis::arrival::{self, WaveArrival};
use crate::analysis::risk::{self, RiskAssessment};
use crate::model::EarthquakeRecord;

/// Events farther than this from the reference point never raise an alert.
pub const ALERT_RADIUS_KM: f64 = 300.0;
/// Maximum number of events shown in the alert box.
pub const MAX_ALERT_EVENTS: usize = 3;
/// How many of the most recent records feed the aggregate.
pub const AGGREGATE_SAMPLE: usize = 50;

pub fn alert_window() -> Duration {
    Duration::hours(24)
}

pub fn aggregate_window() -> Duration {
    Duration::days(7)
}

// ---------------------------------------------------------------------------
// Recent strong events
// ---------------------------------------------------------------------------

/// Two-state alert classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    Alert,
    Safe,
}

/// A strong recent event with its estimated wave arrival at the reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrongEvent {
    pub record: EarthquakeRecord,
    pub arrival: WaveArrival,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertSummary {
    pub state: AlertState,
    pub events: Vec<StrongEvent>,
}

impl AlertSummary {
    pub fn is_alert(&self) -> bool {
        self.state == AlertState::Alert
    }
}

fn is_recent_strong(record: &EarthquakeRecord, threshold: f64, now: DateTime<Utc>) -> bool {
    record.magnitude() >= threshold
        && record.elapsed_since(now) < alert_window()
        && record.distance_to_reference_km() <= ALERT_RADIUS_KM
}

/// Up to three qualifying events, in input (most-recent-first) order.
pub fn recent_strong_events(
    records: &[EarthquakeRecord],
    notification_threshold: f64,
    now: DateTime<Utc>,
) -> Vec<EarthquakeRecord> {
    records
        .iter()
        .filter(|r| is_recent_strong(r, notification_threshold, now))
        .take(MAX_ALERT_EVENTS)
        .cloned()
        .collect()
}

pub fn classify_alert(
    records: &[EarthquakeRecord],
    notification_threshold: f64,
    now: DateTime<Utc>,
) -> AlertSummary {
    let events: Vec<StrongEvent> = recent_strong_events(records, notification_threshold, now)
        .into_iter()
        .map(|record| StrongEvent {
            arrival: arrival::estimate(record.distance_to_reference_km()),
            record,
        })
        .collect();

    let state = if events.is_empty() {
        AlertState::Safe
    } else {
        AlertState::Alert
    };

    AlertSummary { state, events }
}

// ---------------------------------------------------------------------------
// Aggregate regional risk
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AggregateRisk {
    InsufficientData,
    Assessed {
        assessment: RiskAssessment,
        sample_size: usize,
    },
}

impl AggregateRisk {
    pub fn assessment(&self) -> Option<&RiskAssessment> {
        match self {
            AggregateRisk::InsufficientData => None,
            AggregateRisk::Assessed { assessment, .. } => Some(assessment),
        }
    }
}

pub fn aggregate_risk(records: &[EarthquakeRecord], now: DateTime<Utc>) -> AggregateRisk {
    let scores: Vec<f64> = records
        .iter()
        .take(AGGREGATE_SAMPLE)
        .filter(|r| r.elapsed_since(now) <= aggregate_window())
        .map(|r| {
            risk::score(
                r.magnitude(),
                r.depth_km(),
                r.distance_to_reference_km(),
                r.elapsed_since(now),
            )
        })
        .collect();

    if scores.is_empty() {
        return AggregateRisk::InsufficientData;
    }

    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    AggregateRisk::Assessed {
        assessment: RiskAssessment::from_score(mean),
        sample_size: scores.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
