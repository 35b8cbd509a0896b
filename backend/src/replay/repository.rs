use shared::{Replay, ReplayDetail, SearchParams};

use crate::third_party::ReplayApiService;

/// Read access to the replay store as the routes see it.
///
/// Store failures never surface here: a failed search is an empty page and a
/// failed fetch is a missing replay.
#[async_trait::async_trait]
pub trait ReplayRepository: Send + Sync {
    async fn search(&self, params: &SearchParams) -> Vec<Replay>;
    async fn find_by_id(&self, id: &str, password: Option<&str>) -> Option<ReplayDetail>;
}

#[derive(Clone)]
pub struct ReplayRepositoryImpl {
    pub api: ReplayApiService,
}

impl ReplayRepositoryImpl {
    pub fn new(api: ReplayApiService) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ReplayRepository for ReplayRepositoryImpl {
    async fn search(&self, params: &SearchParams) -> Vec<Replay> {
        match self.api.search_replays(params).await {
            Ok(replays) => replays,
            Err(e) => {
                log::warn!("Replay search failed, returning no results: {}", e);
                Vec::new()
            }
        }
    }

    async fn find_by_id(&self, id: &str, password: Option<&str>) -> Option<ReplayDetail> {
        match self.api.get_replay(id, password).await {
            Ok(replay) => replay,
            Err(e) => {
                log::warn!("Fetching replay {} failed: {}", id, e);
                None
            }
        }
    }
}
