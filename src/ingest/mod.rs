/// Upstream earthquake feeds and the fallback/caching coordinator.
///
/// Each feed gets its own file under `ingest/`:
/// - `kandilli`    - Kandilli Observatory plain-text listing (primary)
/// - `usgs`        - USGS FDSN event service GeoJSON (secondary)
/// - `coordinator` - ordered fallback chain with a single-entry TTL cache
/// - `fixtures` (test only) - representative feed payloads

use chrono::{DateTime, Duration, Utc};

use crate::model::EarthquakeRecord;

pub mod coordinator;
pub mod kandilli;
pub mod usgs;

#[cfg(test)]
pub(crate) mod fixtures;

/// Contract shared by every upstream feed.
///
/// `fetch` never fails: transport and top-level parse errors are logged by
/// the adapter and reported as an empty sequence, which tells the
/// coordinator to try the next source. Records come back most-recent-first.
pub trait SourceAdapter {
    /// Short stable identifier used in logs and snapshot provenance.
    fn name(&self) -> &'static str;

    fn fetch(&self, now: DateTime<Utc>) -> Vec<EarthquakeRecord>;
}

/// How far past `now` a feed timestamp may be and still count as clock skew.
pub const MAX_CLOCK_SKEW_SECONDS: i64 = 300;

/// Caps an event time at `now`, returning `None` for timestamps further in
/// the future than the allowed clock skew.
pub(crate) fn not_after(occurred_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if occurred_at <= now {
        Some(occurred_at)
    } else if occurred_at - now <= Duration::seconds(MAX_CLOCK_SKEW_SECONDS) {
        Some(now)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_not_after_caps_small_skew_and_rejects_future() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let past = now - Duration::minutes(3);
        assert_eq!(not_after(past, now), Some(past));
        assert_eq!(not_after(now + Duration::seconds(30), now), Some(now));
        assert_eq!(not_after(now + Duration::hours(3), now), None);
    }
}
