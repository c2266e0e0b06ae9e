use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

use crate::config::Biases;
use crate::error::{Result, TrendingError};
use crate::item::{CandidateSet, Item};
use crate::scoring::{seconds_since, EligibilityWindow, TrendingScorer};

#[derive(Debug, Clone, Serialize)]
pub struct ScoredItem {
    pub item: Item,
    pub comments_count: u64,
    pub seconds_since_answered: u64,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: i64, per_page: i64) -> Result<Self> {
        if page < 0 {
            return Err(TrendingError::InvalidArgument(format!(
                "page must be >= 0, got {}",
                page
            )));
        }
        if per_page <= 0 {
            return Err(TrendingError::InvalidArgument(format!(
                "per_page must be > 0, got {}",
                per_page
            )));
        }
        let page = usize::try_from(page)
            .map_err(|_| TrendingError::InvalidArgument(format!("page out of range: {}", page)))?;
        let per_page = usize::try_from(per_page).map_err(|_| {
            TrendingError::InvalidArgument(format!("per_page out of range: {}", per_page))
        })?;
        Ok(Self { page, per_page })
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.per_page)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedPage {
    pub items: Vec<ScoredItem>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub has_more: bool,
}

impl RankedPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TrendingRanker {
    scorer: TrendingScorer,
    window: EligibilityWindow,
}

impl TrendingRanker {
    pub fn new(biases: &Biases) -> Self {
        Self {
            scorer: TrendingScorer::new(biases),
            window: EligibilityWindow::new(biases.max_days_since_posted),
        }
    }

    pub fn rank(
        &self,
        candidates: &CandidateSet,
        now: DateTime<Utc>,
        page: i64,
        per_page: i64,
    ) -> Result<RankedPage> {
        let request = PageRequest::new(page, per_page)?;
        Ok(self.rank_page(candidates, now, request))
    }

    pub fn rank_page(
        &self,
        candidates: &CandidateSet,
        now: DateTime<Utc>,
        request: PageRequest,
    ) -> RankedPage {
        let mut ranked = self.score_all(candidates, now);
        ranked.sort_by(compare_ranked);

        let total = ranked.len();
        let offset = request.offset().min(total);
        let items: Vec<ScoredItem> = ranked
            .into_iter()
            .skip(offset)
            .take(request.per_page)
            .collect();
        let has_more = offset + items.len() < total;

        RankedPage {
            items,
            page: request.page,
            per_page: request.per_page,
            total,
            has_more,
        }
    }

    pub fn score_all(&self, candidates: &CandidateSet, now: DateTime<Utc>) -> Vec<ScoredItem> {
        candidates
            .items()
            .iter()
            .filter(|item| self.window.is_eligible(item, now))
            .filter_map(|item| {
                let answered_at = item.answered_at?;
                let comments_count = candidates.comments().comments_count(&item.id);
                let seconds_since_answered = seconds_since(answered_at, now);
                let score = self
                    .scorer
                    .score(item.likes_count, comments_count, seconds_since_answered);
                Some(ScoredItem {
                    item: item.clone(),
                    comments_count,
                    seconds_since_answered,
                    score,
                })
            })
            .collect()
    }
}

/// Score descending, then most recently answered, then id ascending.
fn compare_ranked(a: &ScoredItem, b: &ScoredItem) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.item.answered_at.cmp(&a.item.answered_at))
        .then_with(|| a.item.id.cmp(&b.item.id))
}
