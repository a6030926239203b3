/// Composite earthquake risk scoring for Istanbul.
///
/// Each event gets a heuristic score in [1, 5] from four bucketed factors:
/// magnitude sets the base tier, then shallow, close, and recent events are
/// weighted up. All tables are evaluated top to bottom and the first
/// matching row wins.

use chrono::Duration;
use serde::Serialize;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;

// ---------------------------------------------------------------------------
// Factor tables
// ---------------------------------------------------------------------------

/// (magnitude lower bound, base score)
const MAGNITUDE_BASE: &[(f64, f64)] = &[(7.0, 5.0), (6.0, 4.0), (5.0, 3.0), (4.0, 2.0)];

/// (depth upper bound km, factor); shallow events shake the surface harder.
const DEPTH_FACTORS: &[(f64, f64)] = &[(10.0, 1.5), (30.0, 1.2), (50.0, 1.0)];
const DEEP_FACTOR: f64 = 0.8;

/// (distance upper bound km, factor)
const DISTANCE_FACTORS: &[(f64, f64)] = &[(50.0, 1.5), (100.0, 1.2), (200.0, 0.9)];
const FAR_FACTOR: f64 = 0.6;

/// (elapsed upper bound seconds, factor); recent activity may signal an active fault segment.
const RECENCY_FACTORS: &[(i64, f64)] = &[(3_600, 1.3), (86_400, 1.1), (604_800, 0.9)];
const OLD_FACTOR: f64 = 0.7;

pub fn magnitude_base(magnitude: f64) -> f64 {
    MAGNITUDE_BASE
        .iter()
        .find(|(floor, _)| magnitude >= *floor)
        .map(|(_, base)| *base)
        .unwrap_or(1.0)
}

pub fn depth_factor(depth_km: f64) -> f64 {
    DEPTH_FACTORS
        .iter()
        .find(|(ceiling, _)| depth_km < *ceiling)
        .map(|(_, f)| *f)
        .unwrap_or(DEEP_FACTOR)
}

pub fn distance_factor(distance_km: f64) -> f64 {
    DISTANCE_FACTORS
        .iter()
        .find(|(ceiling, _)| distance_km < *ceiling)
        .map(|(_, f)| *f)
        .unwrap_or(FAR_FACTOR)
}

pub fn recency_factor(elapsed: Duration) -> f64 {
    let seconds = elapsed.num_seconds();
    RECENCY_FACTORS
        .iter()
        .find(|(ceiling, _)| seconds < *ceiling)
        .map(|(_, f)| *f)
        .unwrap_or(OLD_FACTOR)
}

/// Unclamped product of the four factors.
pub fn raw_score(magnitude: f64, depth_km: f64, distance_km: f64, elapsed: Duration) -> f64 {
    magnitude_base(magnitude)
        * depth_factor(depth_km)
        * distance_factor(distance_km)
        * recency_factor(elapsed)
}

/// Risk score for a single event, clamped into [1.0, 5.0].
pub fn score(magnitude: f64, depth_km: f64, distance_km: f64, elapsed: Duration) -> f64 {
    raw_score(magnitude, depth_km, distance_km, elapsed).clamp(MIN_SCORE, MAX_SCORE)
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// Textual risk tiers, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskTier {
    /// Maps a score onto a tier using `<` against each tier's upper edge.
    pub fn from_score(score: f64) -> Self {
        if score < 1.5 {
            RiskTier::VeryLow
        } else if score < 2.5 {
            RiskTier::Low
        } else if score < 3.5 {
            RiskTier::Moderate
        } else if score < 4.5 {
            RiskTier::High
        } else {
            RiskTier::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::VeryLow => "very low",
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
            RiskTier::VeryHigh => "very high",
        }
    }

    /// One-line preparedness guidance shown next to the tier.
    pub fn advice(&self) -> &'static str {
        match self {
            RiskTier::VeryLow => "Earthquake risk for Istanbul and its surroundings is currently very low.",
            RiskTier::Low => "Earthquake risk is low. Basic precautions should be in place.",
            RiskTier::Moderate => "Earthquake risk is moderate. Review your precautions and preparations.",
            RiskTier::High => "Earthquake risk is high. Stay alert and take all precautions.",
            RiskTier::VeryHigh => "Earthquake risk is very high. Check your emergency preparations now.",
        }
    }
}

/// A score with its tier. Ephemeral; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub score: f64,
    pub tier: RiskTier,
    pub label: &'static str,
    pub advice: &'static str,
}

impl RiskAssessment {
    pub fn from_score(score: f64) -> Self {
        let tier = RiskTier::from_score(score);
        Self {
            score,
            tier,
            label: tier.label(),
            advice: tier.advice(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
