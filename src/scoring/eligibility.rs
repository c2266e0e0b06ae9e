use chrono::{DateTime, Duration, Utc};

use crate::item::Item;

#[derive(Debug, Clone, Copy)]
pub struct EligibilityWindow {
    max_days_since_posted: u32,
}

impl EligibilityWindow {
    pub fn new(max_days_since_posted: u32) -> Self {
        Self {
            max_days_since_posted,
        }
    }

    pub fn max_age(&self) -> Duration {
        Duration::days(i64::from(self.max_days_since_posted))
    }

    /// Zero days closes the window entirely; otherwise an answer exactly
    /// `max_days_since_posted` days old is still in.
    pub fn is_eligible(&self, item: &Item, now: DateTime<Utc>) -> bool {
        let Some(answered_at) = item.answered_at else {
            return false;
        };
        if self.max_days_since_posted == 0 {
            return false;
        }
        now.signed_duration_since(answered_at) <= self.max_age()
    }
}
