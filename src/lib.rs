/// seismon_service: Istanbul earthquake early-warning data pipeline.
///
/// # Module structure
///
/// ```text
/// seismon_service
/// ├── model       — shared data types (Coordinate, EarthquakeRecord, FeedError, …)
/// ├── geo         — great-circle distance
/// ├── locations   — reference point, target cities, districts, assembly areas
/// ├── config      — seismon.toml loader and range validation
/// ├── pipeline    — one refresh cycle → Snapshot, plus the polling loop
/// ├── endpoint    — JSON HTTP API over the pipeline
/// ├── ingest
/// │   ├── kandilli    — Kandilli Observatory text listing (primary)
/// │   ├── usgs        — USGS FDSN GeoJSON (secondary)
/// │   ├── coordinator — fallback chain with a TTL cache
/// │   └── fixtures (test only) — representative feed payloads
/// ├── alert
/// │   └── classifier  — recent strong events and aggregate regional risk
/// └── analysis
///     ├── filter      — magnitude/distance/time filtering
///     ├── risk        — per-event risk score and tiers
///     ├── arrival     — P/S wave arrival estimates
///     └── statistics  — record table and chart aggregates
/// ```

/// Public modules
pub mod alert;
pub mod analysis;
pub mod config;
pub mod endpoint;
pub mod geo;
pub mod ingest;
pub mod locations;
pub mod model;
pub mod pipeline;
