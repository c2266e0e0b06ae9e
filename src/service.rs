use std::sync::Arc;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::TrendingConfig;
use crate::error::Result;
use crate::scoring::{PageRequest, RankedPage, TrendingRanker};
use crate::store::CandidateStore;

#[derive(Clone)]
pub struct TrendingService {
    config: Arc<TrendingConfig>,
    clock: Arc<dyn Clock>,
    store: Arc<CandidateStore>,
}

impl TrendingService {
    pub fn new(config: TrendingConfig, clock: Arc<dyn Clock>, store: Arc<CandidateStore>) -> Self {
        Self {
            config: Arc::new(config),
            clock,
            store,
        }
    }

    // args, then config, then candidates; `now` is read once
    pub async fn trending(&self, page: i64, per_page: i64) -> Result<RankedPage> {
        let request = PageRequest::new(page, per_page)?;
        let biases = self.config.biases()?;
        let now = self.clock.now();

        let candidates = self.store.snapshot().await;
        debug!(
            candidates = candidates.len(),
            %now,
            "ranking trending candidates"
        );

        let ranked = TrendingRanker::new(&biases).rank_page(&candidates, now, request);
        info!(
            page = ranked.page,
            per_page = ranked.per_page,
            returned = ranked.items.len(),
            total = ranked.total,
            "trending page ranked"
        );
        Ok(ranked)
    }
}
