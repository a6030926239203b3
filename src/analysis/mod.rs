/// Pure computations over normalized earthquake records.
///
/// Submodules:
/// - `filter`     - user-criteria subsetting for the map and list.
/// - `risk`       - composite per-event risk score and tiers.
/// - `arrival`    - P/S wave travel-time estimates.
/// - `statistics` - tabular view and chart series of the full sequence.

pub mod arrival;
pub mod filter;
pub mod risk;
pub mod statistics;
