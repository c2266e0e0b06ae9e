use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trending_rank::{ItemId, RankedPage, ScoredItem, EMPTY_STATE_MESSAGE};

#[derive(Debug, Deserialize)]
pub struct ApiTrendingQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl ApiTrendingQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0)
    }

    pub fn per_page(&self, default_per_page: i64) -> i64 {
        self.per_page.unwrap_or(default_per_page)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiTrendingItem {
    pub rank: usize,
    pub id: ItemId,
    pub content: serde_json::Value,
    pub answered_at: Option<DateTime<Utc>>,
    pub likes_count: u64,
    pub comments_count: u64,
    pub seconds_since_answered: u64,
    pub score: f64,
}

impl ApiTrendingItem {
    fn from_scored(rank: usize, scored: ScoredItem) -> Self {
        Self {
            rank,
            id: scored.item.id,
            content: scored.item.content,
            answered_at: scored.item.answered_at,
            likes_count: scored.item.likes_count,
            comments_count: scored.comments_count,
            seconds_since_answered: scored.seconds_since_answered,
            score: scored.score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiTrendingResponse {
    pub items: Vec<ApiTrendingItem>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub has_more: bool,
    pub empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiTrendingResponse {
    pub fn from_page(page: RankedPage) -> Self {
        let empty = page.is_empty();
        let offset = page.page.saturating_mul(page.per_page);
        let items = page
            .items
            .into_iter()
            .enumerate()
            .map(|(idx, scored)| ApiTrendingItem::from_scored(offset + idx + 1, scored))
            .collect();

        Self {
            items,
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            has_more: page.has_more,
            empty,
            message: empty.then(|| EMPTY_STATE_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}
