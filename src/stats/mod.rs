//! Match-history aggregation into team and sport summaries.

/// Full-recompute aggregation pass.
pub mod aggregator;
/// Derived summary records.
pub mod summary;

pub use aggregator::build;
pub use summary::{SportOverview, StatsSummary, TeamRecord};
