/// One full refresh cycle, and the polling loop that repeats it.
///
/// A cycle:
/// 1. Reads records through the ingestion coordinator (cache or feeds)
/// 2. Filters them with the configured criteria
/// 3. Builds the record table and chart statistics from the full sequence
/// 4. Classifies the alert and computes the aggregate regional risk
/// 5. Packages everything into a serializable `Snapshot`

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::alert::classifier::{self, AggregateRisk, AlertSummary};
use crate::analysis::arrival::{self, WaveArrival};
use crate::analysis::filter::{self, FilterCriteria};
use crate::analysis::statistics::{self, RecordTable};
use crate::config::Config;
use crate::ingest::coordinator::IngestionCoordinator;
use crate::ingest::kandilli::KandilliAdapter;
use crate::ingest::usgs::UsgsAdapter;
use crate::ingest::SourceAdapter;
use crate::locations::{GeoReferenceTable, NamedLocation};
use crate::model::{EarthquakeRecord, FeedError};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Whether the cycle had anything to work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DataStatus {
    Live { source: &'static str },
    NoData,
}

/// Everything the presentation layer renders for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub data_status: DataStatus,
    pub record_count: usize,
    pub criteria: FilterCriteria,
    pub filtered: Vec<EarthquakeRecord>,
    pub alert: AlertSummary,
    pub aggregate: AggregateRisk,
    pub statistics: RecordTable,
    pub reference: NamedLocation,
    pub target_cities: Vec<NamedLocation>,
    pub selected_districts: Vec<NamedLocation>,
    pub assembly_areas: Vec<NamedLocation>,
}

/// P/S arrival for one record of the full sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrivalReport {
    pub index: usize,
    pub record: EarthquakeRecord,
    pub arrival: WaveArrival,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

pub struct Pipeline {
    config: Config,
    coordinator: IngestionCoordinator,
    geo: GeoReferenceTable,
}

impl Pipeline {
    pub fn new(config: Config, coordinator: IngestionCoordinator, geo: GeoReferenceTable) -> Self {
        Self { config, coordinator, geo }
    }

    /// Wires the Kandilli (primary) and USGS (secondary) adapters from `config`.
    pub fn from_config(config: Config) -> Result<Self, FeedError> {
        let geo = GeoReferenceTable::istanbul();
        let sources = &config.sources;

        let adapters: Vec<Box<dyn SourceAdapter>> = vec![
            Box::new(KandilliAdapter::new(
                sources.kandilli_url.clone(),
                sources.kandilli_timeout_secs,
                geo.reference_point,
            )?),
            Box::new(UsgsAdapter::new(
                sources.usgs_url.clone(),
                sources.usgs_timeout_secs,
                geo.reference_point,
            )?),
        ];
        let coordinator = IngestionCoordinator::new(adapters, config.refresh.cache_ttl_secs);

        Ok(Self::new(config, coordinator, geo))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run_cycle(&mut self) -> Snapshot {
        self.run_cycle_at(Utc::now())
    }

    pub fn run_cycle_at(&mut self, now: DateTime<Utc>) -> Snapshot {
        let filters = &self.config.filters;
        let criteria = FilterCriteria::with_lookback(
            filters.min_magnitude,
            filters.max_distance_km,
            filters.lookback_days,
            now,
        );
        let threshold = self.config.alerts.notification_threshold;
        let selected_districts = self.geo.select_districts(&self.config.alerts.districts);

        self.coordinator.refresh_if_stale(now);
        let records = self.coordinator.records();
        let data_status = match self.coordinator.last_source() {
            Some(source) if !records.is_empty() => DataStatus::Live { source },
            _ => DataStatus::NoData,
        };

        let snapshot = Snapshot {
            generated_at: now,
            data_status,
            record_count: records.len(),
            criteria,
            filtered: filter::apply(records, &criteria),
            alert: classifier::classify_alert(records, threshold, now),
            aggregate: classifier::aggregate_risk(records, now),
            statistics: statistics::build_table(records),
            reference: NamedLocation {
                name: self.geo.reference_name,
                coordinate: self.geo.reference_point,
            },
            target_cities: self.geo.target_cities.to_vec(),
            selected_districts,
            assembly_areas: self.geo.assembly_areas.to_vec(),
        };

        info!(
            records = snapshot.record_count,
            filtered = snapshot.filtered.len(),
            alert = snapshot.alert.is_alert(),
            "cycle complete"
        );
        snapshot
    }

    /// Arrival estimate for the `index`-th record of the full sequence, or
    /// `None` when the index is out of bounds.
    pub fn arrival_at(&mut self, index: usize, now: DateTime<Utc>) -> Option<ArrivalReport> {
        let record = self.coordinator.get_records_at(now).get(index)?.clone();
        Some(ArrivalReport {
            index,
            arrival: arrival::estimate(record.distance_to_reference_km()),
            record,
        })
    }

    /// Main polling loop (runs indefinitely)
    pub fn run(&mut self) {
        let interval = self.config.refresh.interval_secs;
        println!("🔄 Starting polling loop...");
        println!("   Refresh interval: {} seconds", interval);
        println!("   Press Ctrl+C to stop\n");

        self.poll(None);
    }

    /// Runs cycles back to back, the first one immediately, sleeping out the
    /// refresh interval between them. Stops after `max_cycles` if given and
    /// returns the number of cycles run.
    pub fn poll(&mut self, max_cycles: Option<usize>) -> usize {
        let interval = self.config.refresh.interval_secs as i64;
        let mut cycles = 0;

        loop {
            let start = Utc::now();
            let snapshot = self.run_cycle_at(start);
            print_summary(&snapshot);
            cycles += 1;

            if max_cycles.is_some_and(|max| cycles >= max) {
                return cycles;
            }

            // Sleep until next refresh
            let sleep_seconds = interval - (Utc::now() - start).num_seconds();
            if sleep_seconds > 0 {
                std::thread::sleep(std::time::Duration::from_secs(sleep_seconds as u64));
            }
        }
    }
}

/// Human-readable one-cycle summary on stdout.
pub fn print_summary(snapshot: &Snapshot) {
    let source = match snapshot.data_status {
        DataStatus::Live { source } => source,
        DataStatus::NoData => "no data",
    };
    println!(
        "[{}] {} records ({}), {} after filters",
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        snapshot.record_count,
        source,
        snapshot.filtered.len()
    );

    match snapshot.aggregate.assessment() {
        Some(a) => println!("   Regional risk: {:.2} ({})", a.score, a.label),
        None => println!("   Regional risk: insufficient data"),
    }

    if snapshot.alert.is_alert() {
        for event in &snapshot.alert.events {
            println!(
                "   ⚠ M{:.1} {} ({:.0} km) - S-wave in {:.0}s",
                event.record.magnitude(),
                event.record.location_label(),
                event.record.distance_to_reference_km(),
                event.arrival.s_wave_seconds
            );
        }
    } else {
        println!("   No strong recent earthquakes");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::classifier::AlertState;
    use crate::locations::REFERENCE_POINT;
    use crate::model::Coordinate;
    use chrono::{Duration, TimeZone};

    struct FixedAdapter(Vec<EarthquakeRecord>);

    impl SourceAdapter for FixedAdapter {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn fetch(&self, _now: DateTime<Utc>) -> Vec<EarthquakeRecord> {
            self.0.clone()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn record(hours_ago: i64, magnitude: f64, lat: f64, lon: f64) -> EarthquakeRecord {
        EarthquakeRecord::new(
            now() - Duration::hours(hours_ago),
            Coordinate::new(lat, lon),
            10.0,
            magnitude,
            "TEST",
            REFERENCE_POINT,
        )
        .unwrap()
    }

    fn pipeline_with(records: Vec<EarthquakeRecord>) -> Pipeline {
        let coordinator = IngestionCoordinator::new(vec![Box::new(FixedAdapter(records))], 60);
        Pipeline::new(Config::default(), coordinator, GeoReferenceTable::istanbul())
    }

    #[test]
    fn test_empty_ingestion_is_no_data_and_safe() {
        let mut pipeline = pipeline_with(Vec::new());
        let snapshot = pipeline.run_cycle_at(now());

        assert_eq!(snapshot.data_status, DataStatus::NoData);
        assert_eq!(snapshot.alert.state, AlertState::Safe);
        assert_eq!(snapshot.aggregate, AggregateRisk::InsufficientData);
        assert!(snapshot.filtered.is_empty());
        assert!(snapshot.statistics.is_empty());
    }

    #[test]
    fn test_strong_nearby_event_raises_alert() {
        let mut pipeline = pipeline_with(vec![
            record(1, 4.8, 40.85, 28.2),
            record(30, 3.2, 40.7, 29.9),
        ]);
        let snapshot = pipeline.run_cycle_at(now());

        assert_eq!(snapshot.data_status, DataStatus::Live { source: "fixed" });
        assert_eq!(snapshot.record_count, 2);
        assert!(snapshot.alert.is_alert());
        assert_eq!(snapshot.alert.events.len(), 1);
        assert!(snapshot.aggregate.assessment().is_some());
    }

    #[test]
    fn test_filter_uses_configured_minimum() {
        let mut pipeline = pipeline_with(vec![
            record(1, 2.5, 40.85, 28.2),
            record(2, 3.5, 40.85, 28.2),
        ]);
        let snapshot = pipeline.run_cycle_at(now());

        assert_eq!(snapshot.filtered.len(), 1);
        assert_eq!(snapshot.filtered[0].magnitude(), 3.5);
        assert_eq!(snapshot.statistics.rows.len(), 2, "table covers the full sequence");
    }

    #[test]
    fn test_snapshot_lists_map_markers() {
        let mut pipeline = pipeline_with(Vec::new());
        let snapshot = pipeline.run_cycle_at(now());

        assert_eq!(snapshot.target_cities.len(), 6);
        assert_eq!(snapshot.selected_districts.len(), 4);
        assert_eq!(snapshot.assembly_areas.len(), 12);
        assert_eq!(snapshot.reference.coordinate, REFERENCE_POINT);
    }

    struct CountingAdapter(std::rc::Rc<std::cell::Cell<usize>>);

    impl SourceAdapter for CountingAdapter {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn fetch(&self, _now: DateTime<Utc>) -> Vec<EarthquakeRecord> {
            self.0.set(self.0.get() + 1);
            vec![record(1, 4.0, 40.85, 28.2)]
        }
    }

    #[test]
    fn test_poll_runs_first_cycle_immediately_and_once() {
        let calls = std::rc::Rc::new(std::cell::Cell::new(0));
        let adapter = CountingAdapter(std::rc::Rc::clone(&calls));
        let coordinator = IngestionCoordinator::new(vec![Box::new(adapter)], 60);
        let mut pipeline = Pipeline::new(Config::default(), coordinator, GeoReferenceTable::istanbul());

        let started = std::time::Instant::now();
        assert_eq!(pipeline.poll(Some(1)), 1);
        assert_eq!(calls.get(), 1, "one cycle means one fetch");
        assert!(started.elapsed() < std::time::Duration::from_secs(30), "no sleep after the last cycle");
    }

    #[test]
    fn test_arrival_for_index_and_out_of_range() {
        let mut pipeline = pipeline_with(vec![record(1, 4.0, 40.85, 28.2)]);
        let report = pipeline.arrival_at(0, now()).expect("index 0 exists");
        assert_eq!(report.index, 0);
        assert!(report.arrival.p_wave_seconds < report.arrival.s_wave_seconds);
        assert!(pipeline.arrival_at(1, now()).is_none());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut pipeline = pipeline_with(vec![record(1, 4.8, 40.85, 28.2)]);
        let snapshot = pipeline.run_cycle_at(now());
        let json = serde_json::to_value(&snapshot).expect("snapshot should serialize");

        assert_eq!(json["data_status"]["status"], "live");
        assert_eq!(json["data_status"]["source"], "fixed");
        assert_eq!(json["alert"]["state"], "alert");
    }
}
