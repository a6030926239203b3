/// Ordered fallback across source adapters, behind a single-entry TTL cache.
///
/// Adapters are tried in order until one returns a non-empty sequence.
/// Whatever the chain produced (including nothing) is cached for `ttl`, so
/// repeated reads inside the window never touch the network.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::ingest::SourceAdapter;
use crate::model::EarthquakeRecord;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;
pub const MIN_CACHE_TTL_SECS: u64 = 30;
pub const MAX_CACHE_TTL_SECS: u64 = 300;

/// Where the cache stands relative to a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    NotFetched,
    Fresh,
    Stale,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    records: Vec<EarthquakeRecord>,
    source: Option<&'static str>,
    fetched_at: DateTime<Utc>,
}

pub struct IngestionCoordinator {
    adapters: Vec<Box<dyn SourceAdapter>>,
    ttl: Duration,
    cache: Option<CacheEntry>,
}

impl IngestionCoordinator {
    /// `adapters` are consulted in priority order.
    pub fn new(adapters: Vec<Box<dyn SourceAdapter>>, ttl_secs: u64) -> Self {
        let ttl_secs = ttl_secs.clamp(MIN_CACHE_TTL_SECS, MAX_CACHE_TTL_SECS);
        Self {
            adapters,
            ttl: Duration::seconds(ttl_secs as i64),
            cache: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn state(&self, now: DateTime<Utc>) -> CacheState {
        match &self.cache {
            None => CacheState::NotFetched,
            Some(entry) if now - entry.fetched_at < self.ttl => CacheState::Fresh,
            Some(_) => CacheState::Stale,
        }
    }

    /// Name of the adapter that produced the cached records, if any did.
    pub fn last_source(&self) -> Option<&'static str> {
        self.cache.as_ref().and_then(|entry| entry.source)
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.cache.as_ref().map(|entry| entry.fetched_at)
    }

    pub fn get_records(&mut self) -> &[EarthquakeRecord] {
        self.get_records_at(Utc::now())
    }

    /// Returns cached records while fresh, otherwise runs the fallback chain
    /// and replaces the cache with its result.
    pub fn get_records_at(&mut self, now: DateTime<Utc>) -> &[EarthquakeRecord] {
        self.refresh_if_stale(now);
        self.records()
    }

    /// Runs the fallback chain unless the cache is fresh at `now`.
    pub fn refresh_if_stale(&mut self, now: DateTime<Utc>) {
        if self.state(now) == CacheState::Fresh {
            debug!("serving earthquake records from cache");
            return;
        }
        let entry = self.run_chain(now);
        self.cache = Some(entry);
    }

    /// Whatever is cached, fresh or not. Empty before the first fetch.
    pub fn records(&self) -> &[EarthquakeRecord] {
        match &self.cache {
            Some(entry) => &entry.records,
            None => &[],
        }
    }

    fn run_chain(&self, now: DateTime<Utc>) -> CacheEntry {
        for adapter in &self.adapters {
            let records = adapter.fetch(now);
            if !records.is_empty() {
                info!(source = adapter.name(), count = records.len(), "ingested earthquake records");
                return CacheEntry {
                    records,
                    source: Some(adapter.name()),
                    fetched_at: now,
                };
            }
            debug!(source = adapter.name(), "source returned no records, falling back");
        }

        warn!("all earthquake sources returned no records");
        CacheEntry {
            records: Vec::new(),
            source: None,
            fetched_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::REFERENCE_POINT;
    use crate::model::Coordinate;
    use chrono::TimeZone;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Adapter that returns a fixed number of records and counts its calls.
    struct ScriptedAdapter {
        name: &'static str,
        record_count: usize,
        calls: Rc<Cell<usize>>,
    }

    impl SourceAdapter for ScriptedAdapter {
        fn name(&self) -> &'static str {
            self.name
        }

        fn fetch(&self, now: DateTime<Utc>) -> Vec<EarthquakeRecord> {
            self.calls.set(self.calls.get() + 1);
            (0..self.record_count)
                .map(|i| {
                    EarthquakeRecord::new(
                        now - Duration::hours(i as i64),
                        Coordinate::new(40.8, 29.0),
                        10.0,
                        3.0,
                        self.name,
                        REFERENCE_POINT,
                    )
                    .unwrap()
                })
                .collect()
        }
    }

    fn scripted(name: &'static str, record_count: usize) -> (Box<dyn SourceAdapter>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let adapter = ScriptedAdapter {
            name,
            record_count,
            calls: Rc::clone(&calls),
        };
        (Box::new(adapter), calls)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_primary_with_records_skips_secondary() {
        let (primary, primary_calls) = scripted("primary", 2);
        let (secondary, secondary_calls) = scripted("secondary", 5);
        let mut coordinator = IngestionCoordinator::new(vec![primary, secondary], 60);

        let records = coordinator.get_records_at(now());
        assert_eq!(records.len(), 2);
        assert_eq!(primary_calls.get(), 1);
        assert_eq!(secondary_calls.get(), 0, "secondary must not be consulted");
        assert_eq!(coordinator.last_source(), Some("primary"));
    }

    #[test]
    fn test_empty_primary_falls_back_once() {
        let (primary, _) = scripted("primary", 0);
        let (secondary, secondary_calls) = scripted("secondary", 3);
        let mut coordinator = IngestionCoordinator::new(vec![primary, secondary], 60);

        assert_eq!(coordinator.get_records_at(now()).len(), 3);
        assert_eq!(secondary_calls.get(), 1);
        assert_eq!(coordinator.last_source(), Some("secondary"));
    }

    #[test]
    fn test_all_sources_empty_yields_empty_without_source() {
        let (primary, _) = scripted("primary", 0);
        let (secondary, _) = scripted("secondary", 0);
        let mut coordinator = IngestionCoordinator::new(vec![primary, secondary], 60);

        assert!(coordinator.get_records_at(now()).is_empty());
        assert_eq!(coordinator.last_source(), None);
        assert_eq!(coordinator.state(now()), CacheState::Fresh);
    }

    #[test]
    fn test_cache_hit_within_ttl_does_not_refetch() {
        let (primary, calls) = scripted("primary", 1);
        let mut coordinator = IngestionCoordinator::new(vec![primary], 60);

        coordinator.get_records_at(now());
        coordinator.get_records_at(now() + Duration::seconds(30));
        coordinator.get_records_at(now() + Duration::seconds(59));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_cache_replaced_after_expiry() {
        let (primary, calls) = scripted("primary", 1);
        let mut coordinator = IngestionCoordinator::new(vec![primary], 60);

        coordinator.get_records_at(now());
        let later = now() + Duration::seconds(60);
        assert_eq!(coordinator.state(later), CacheState::Stale);

        coordinator.get_records_at(later);
        assert_eq!(calls.get(), 2);
        assert_eq!(coordinator.fetched_at(), Some(later));
    }

    #[test]
    fn test_empty_result_is_cached_too() {
        let (primary, primary_calls) = scripted("primary", 0);
        let (secondary, secondary_calls) = scripted("secondary", 0);
        let mut coordinator = IngestionCoordinator::new(vec![primary, secondary], 60);

        coordinator.get_records_at(now());
        coordinator.get_records_at(now() + Duration::seconds(10));
        assert_eq!(primary_calls.get(), 1);
        assert_eq!(secondary_calls.get(), 1);
    }

    #[test]
    fn test_state_before_first_fetch() {
        let coordinator = IngestionCoordinator::new(Vec::new(), 60);
        assert_eq!(coordinator.state(now()), CacheState::NotFetched);
        assert_eq!(coordinator.fetched_at(), None);
    }

    #[test]
    fn test_ttl_clamped_to_allowed_range() {
        assert_eq!(IngestionCoordinator::new(Vec::new(), 5).ttl(), Duration::seconds(30));
        assert_eq!(IngestionCoordinator::new(Vec::new(), 900).ttl(), Duration::seconds(300));
        assert_eq!(IngestionCoordinator::new(Vec::new(), 120).ttl(), Duration::seconds(120));
    }
}
