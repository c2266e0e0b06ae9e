pub mod clock;
pub mod config;
pub mod error;
pub mod item;
pub mod scoring;
pub mod service;
pub mod store;
pub mod synthetic;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Biases, TrendingConfig};
pub use error::{Result, TrendingError};
pub use item::{CandidateSet, CommentIndex, Item, ItemId};
pub use scoring::{PageRequest, RankedPage, ScoredItem, TrendingRanker, TrendingScorer};
pub use service::TrendingService;
pub use store::CandidateStore;

pub const EMPTY_STATE_MESSAGE: &str = "There is no trending questions right now";

pub fn format_score(value: f64) -> String {
    format!("{:.4e}", value)
}

pub fn format_age(seconds: u64) -> String {
    match seconds {
        0..=59 => format!("{}s", seconds),
        60..=3_599 => format!("{}m", seconds / 60),
        3_600..=86_399 => format!("{}h", seconds / 3_600),
        _ => format!("{}d", seconds / 86_400),
    }
}

pub fn content_label(content: &serde_json::Value) -> String {
    match content {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_ages_by_largest_unit() {
        assert_eq!(format_age(42), "42s");
        assert_eq!(format_age(600), "10m");
        assert_eq!(format_age(7_200), "2h");
        assert_eq!(format_age(86_400 * 3), "3d");
    }

    #[test]
    fn formats_scores_in_scientific_notation() {
        assert_eq!(format_score(1.0 / 86_401.0), "1.1574e-5");
    }

    #[test]
    fn labels_opaque_content() {
        assert_eq!(content_label(&serde_json::json!("hello")), "hello");
        assert_eq!(content_label(&serde_json::json!({"title": "x"})), r#"{"title":"x"}"#);
    }
}
