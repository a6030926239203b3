/// Tabular view of the full record sequence for the statistics charts.
///
/// The presentation layer draws a magnitude histogram, a depth histogram,
/// a daily event count line and a magnitude/depth scatter. This module
/// precomputes all four so the charting side only has to plot numbers.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::model::EarthquakeRecord;

/// Bin count used for both histograms.
pub const HISTOGRAM_BINS: usize = 20;

/// One row of the record table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub occurred_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub depth_km: f64,
    pub magnitude: f64,
    pub location_label: String,
    pub distance_to_reference_km: f64,
}

impl From<&EarthquakeRecord> for TableRow {
    fn from(r: &EarthquakeRecord) -> Self {
        TableRow {
            occurred_at: r.occurred_at(),
            latitude: r.latitude(),
            longitude: r.longitude(),
            depth_km: r.depth_km(),
            magnitude: r.magnitude(),
            location_label: r.location_label().to_string(),
            distance_to_reference_km: r.distance_to_reference_km(),
        }
    }
}

/// Half-open bin `[lower, upper)`, except the last bin which includes `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MagnitudeDepth {
    pub magnitude: f64,
    pub depth_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordTable {
    pub rows: Vec<TableRow>,
    pub magnitude_histogram: Vec<HistogramBin>,
    pub depth_histogram: Vec<HistogramBin>,
    pub daily_counts: Vec<DailyCount>,
    pub magnitude_depth: Vec<MagnitudeDepth>,
}

impl RecordTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the table and chart series from the full (unfiltered) sequence.
pub fn build_table(records: &[EarthquakeRecord]) -> RecordTable {
    let magnitudes: Vec<f64> = records.iter().map(|r| r.magnitude()).collect();
    let depths: Vec<f64> = records.iter().map(|r| r.depth_km()).collect();

    RecordTable {
        rows: records.iter().map(TableRow::from).collect(),
        magnitude_histogram: histogram(&magnitudes, HISTOGRAM_BINS),
        depth_histogram: histogram(&depths, HISTOGRAM_BINS),
        daily_counts: daily_counts(records),
        magnitude_depth: records
            .iter()
            .map(|r| MagnitudeDepth {
                magnitude: r.magnitude(),
                depth_km: r.depth_km(),
            })
            .collect(),
    }
}

/// Equal-width histogram over the observed range of `values`.
///
/// Returns no bins for empty input and a single zero-width bin when every
/// value is identical.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max <= min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        result[idx].count += 1;
    }

    result
}

/// Event counts per UTC calendar day, oldest first, with empty days filled in.
pub fn daily_counts(records: &[EarthquakeRecord]) -> Vec<DailyCount> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for r in records {
        *per_day.entry(r.occurred_at().date_naive()).or_insert(0) += 1;
    }

    let (Some(first), Some(last)) = (
        per_day.keys().next().copied(),
        per_day.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut day = first;
    while day <= last {
        out.push(DailyCount {
            date: day,
            count: per_day.get(&day).copied().unwrap_or(0),
        });
        day += Duration::days(1);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
