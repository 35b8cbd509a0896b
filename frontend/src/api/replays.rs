use gloo_net::http::Request;
use log::debug;
use shared::{Replay, SearchParams};

use crate::api::api_url;

pub async fn search_replays(params: &SearchParams) -> Result<Vec<Replay>, String> {
    debug!("Searching replays with {:?}", params);

    let response = Request::get(&api_url("/replays/search.json"))
        .query(params.query_pairs())
        .send()
        .await
        .map_err(|e| format!("Failed to search replays: {}", e))?;

    if !response.ok() {
        return Err(format!("Replay search failed with status {}", response.status()));
    }

    let replays = response
        .json::<Vec<Replay>>()
        .await
        .map_err(|e| format!("Failed to parse replay search response: {}", e))?;

    debug!("Replay search returned {} replays", replays.len());
    Ok(replays)
}
