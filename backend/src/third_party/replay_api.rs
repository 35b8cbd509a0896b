use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::{Replay, ReplayDetail, SearchParams};
use thiserror::Error;

/// Every store response starts with this byte before the JSON payload.
const ENVELOPE_PREFIX: char = ']';

#[derive(Debug, Error)]
pub enum ReplayApiError {
    #[error("replay API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("replay API returned status {0}")]
    Status(u16),

    #[error("replay API response is missing the ']' prefix")]
    Envelope,

    #[error("replay API response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    replays: Vec<Replay>,
}

#[derive(Debug, Deserialize)]
struct ReplayEnvelope {
    #[serde(default)]
    replay: Option<ReplayDetail>,
}

#[derive(Debug, Serialize)]
struct GetReplayRequest<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

/// Strips the `]` prefix and decodes the JSON behind it.
pub fn parse_envelope<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, ReplayApiError> {
    let payload = body
        .strip_prefix(ENVELOPE_PREFIX)
        .ok_or(ReplayApiError::Envelope)?;
    Ok(serde_json::from_str(payload)?)
}

pub fn parse_search_envelope(body: &str) -> Result<Vec<Replay>, ReplayApiError> {
    parse_envelope::<SearchEnvelope>(body).map(|envelope| envelope.replays)
}

pub fn parse_replay_envelope(body: &str) -> Result<Option<ReplayDetail>, ReplayApiError> {
    parse_envelope::<ReplayEnvelope>(body).map(|envelope| envelope.replay)
}

/// Client for the remote replay store.
#[derive(Clone)]
pub struct ReplayApiService {
    api_url: String,
    client: reqwest::Client,
}

impl ReplayApiService {
    pub fn new_with_config(config: &crate::config::ReplayApiConfig) -> Result<Self, ReplayApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            api_url: config.api_url.clone(),
            client,
        })
    }

    pub fn new_with_url(api_url: String) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn post_text<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<String, ReplayApiError> {
        let url = format!("{}/{}", self.api_url, endpoint);
        log::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;

        log::debug!("Replay API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(ReplayApiError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }

    pub async fn search_replays(&self, params: &SearchParams) -> Result<Vec<Replay>, ReplayApiError> {
        log::info!("Searching replays with {:?}", params);

        let body = self.post_text("searchreplays", params).await?;
        log::debug!("Replay search response length: {} characters", body.len());

        let replays = parse_search_envelope(&body)?;
        log::info!("Replay API returned {} replays", replays.len());
        Ok(replays)
    }

    pub async fn get_replay(
        &self,
        id: &str,
        password: Option<&str>,
    ) -> Result<Option<ReplayDetail>, ReplayApiError> {
        log::info!("Fetching replay {} (private: {})", id, password.is_some());

        let body = self
            .post_text("getreplay", &GetReplayRequest { id, password })
            .await?;

        parse_replay_envelope(&body)
    }
}
