pub mod eligibility;
pub mod pipeline;
pub mod trending;

pub use eligibility::EligibilityWindow;
pub use pipeline::{PageRequest, RankedPage, ScoredItem, TrendingRanker};
pub use trending::{seconds_since, TrendingScorer};
