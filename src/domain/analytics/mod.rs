// Per-driver performance analytics. Every function here is a pure projection of
// its input: no I/O, no caching, safe to call concurrently and memoize externally.
pub mod consistency;
pub mod correlation;
pub mod form;
pub mod reliability;
pub mod scoring;
pub mod season_summary;
pub mod stats;
pub mod trends;

pub use consistency::{ConsistencyMetrics, consistency_score};
pub use correlation::{CorrelationResult, PerformerClass, ScatterPoint, qualifying_race_correlation};
pub use form::{FormIndicator, TrendDirection, form_indicator, recent_form};
pub use reliability::{DnfReport, dnf_rate};
pub use scoring::{PointsSummary, points_per_race};
pub use season_summary::{SeasonSummary, season_summary};
pub use trends::{TrendMetric, TrendPoint, performance_trends};
