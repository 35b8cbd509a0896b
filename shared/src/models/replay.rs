use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::normalize::to_id;

/// A replay as listed by a search. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Replay {
    pub id: String,
    pub p1: String,
    pub p2: String,
    pub format: String,

    /// Upload time in seconds since the Unix epoch
    #[serde(default)]
    pub uploadtime: i64,

    /// Unrated replays come back with `null`
    #[serde(default, deserialize_with = "null_as_zero")]
    pub rating: f64,
}

impl Replay {
    /// "p1 vs. p2", the list entry title.
    pub fn matchup_label(&self) -> String {
        format!("{} vs. {}", self.p1, self.p2)
    }

    /// Upload date in UTC, formatted like "Mar 5, 2024".
    pub fn upload_date_label(&self) -> String {
        DateTime::from_timestamp(self.uploadtime, 0)
            .map(|date| date.format("%b %-d, %Y").to_string())
            .unwrap_or_default()
    }

    /// "format [date]", the list entry subtitle.
    pub fn summary_label(&self) -> String {
        format!("{} [{}]", self.format, self.upload_date_label())
    }

    pub fn page_path(&self) -> String {
        format!("/replays/{}", self.id)
    }
}

/// A single replay as returned by the store's `getreplay` call.
///
/// Fields the proxy does not interpret are kept in `extra` so the JSON route
/// hands the upstream object back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplayDetail {
    pub id: String,
    pub format: String,
    pub p1: String,
    pub p2: String,

    #[serde(default)]
    pub p1id: String,
    #[serde(default)]
    pub p2id: String,

    /// Raw battle log text
    #[serde(default)]
    pub log: String,

    #[serde(default)]
    pub uploadtime: i64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub rating: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReplayDetail {
    pub fn p1_id(&self) -> String {
        if self.p1id.is_empty() {
            to_id(&self.p1)
        } else {
            self.p1id.clone()
        }
    }

    pub fn p2_id(&self) -> String {
        if self.p2id.is_empty() {
            to_id(&self.p2)
        } else {
            self.p2id.clone()
        }
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
