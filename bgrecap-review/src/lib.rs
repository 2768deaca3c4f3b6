//! Year-in-review aggregation, ranking and enrichment for bgrecap

pub mod aggregator;
pub mod enrichment;
pub mod ranking;
pub mod review;
pub mod summary;

// Re-export commonly used types
pub use aggregator::{aggregate_plays, GameAggregate, PlayAggregator, PlayStats};
pub use enrichment::{tally_enrichment, Enrichment};
pub use ranking::{
    most_played_days, most_played_month, top_by_count, top_by_time, TOP_GAMES, TOP_TAGS,
};
pub use review::year_in_review;
pub use summary::{DayPlays, LongestSession, MonthPlays, RankedGame, TagTally, YearSummary};
