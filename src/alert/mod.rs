/// Early-warning alerting.
///
/// - `classifier` - recent strong event list and aggregate regional risk.

pub mod classifier;
