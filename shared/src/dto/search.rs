use serde::{Deserialize, Serialize};

use crate::normalize::to_id;

/// Sort order of search results by upload time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Filter values exactly as the user typed them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SearchFilters {
    pub format: String,
    pub username1: String,
    pub username2: String,
    pub order: SortOrder,
}

/// A partial filter edit; `None` leaves the field as it is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterUpdate {
    pub format: Option<String>,
    pub username1: Option<String>,
    pub username2: Option<String>,
    pub order: Option<SortOrder>,
}

impl FilterUpdate {
    pub fn format(value: impl Into<String>) -> Self {
        Self { format: Some(value.into()), ..Self::default() }
    }

    pub fn username1(value: impl Into<String>) -> Self {
        Self { username1: Some(value.into()), ..Self::default() }
    }

    pub fn username2(value: impl Into<String>) -> Self {
        Self { username2: Some(value.into()), ..Self::default() }
    }

    pub fn order(value: SortOrder) -> Self {
        Self { order: Some(value), ..Self::default() }
    }
}

impl From<SearchFilters> for FilterUpdate {
    fn from(filters: SearchFilters) -> Self {
        Self {
            format: Some(filters.format),
            username1: Some(filters.username1),
            username2: Some(filters.username2),
            order: Some(filters.order),
        }
    }
}

impl SearchFilters {
    /// Applies an edit and reports whether any field actually changed.
    pub fn apply(&mut self, update: FilterUpdate) -> bool {
        let mut changed = false;

        if let Some(format) = update.format {
            changed |= format != self.format;
            self.format = format;
        }
        if let Some(username1) = update.username1 {
            changed |= username1 != self.username1;
            self.username1 = username1;
        }
        if let Some(username2) = update.username2 {
            changed |= username2 != self.username2;
            self.username2 = username2;
        }
        if let Some(order) = update.order {
            changed |= order != self.order;
            self.order = order;
        }

        changed
    }
}

/// Search parameters as sent to the replay store.
///
/// The same shape is used on both hops: the client sends it as a query string
/// and the proxy forwards it as a JSON body to `searchreplays`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

impl SearchParams {
    /// Builds the request for one page of the given filters. Free-text fields
    /// are normalized and dropped when nothing is left.
    pub fn for_page(filters: &SearchFilters, page: u32) -> Self {
        Self {
            page: Some(i64::from(page)),
            rating: None,
            format: non_empty(to_id(&filters.format)),
            username: non_empty(to_id(&filters.username1)),
            username2: non_empty(to_id(&filters.username2)),
            order: Some(filters.order.as_str().to_string()),
        }
    }

    /// Query string pairs in a stable order, absent fields skipped.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(true) = self.rating {
            pairs.push(("rating", "1".to_string()));
        }
        if let Some(format) = &self.format {
            pairs.push(("format", format.clone()));
        }
        if let Some(username) = &self.username {
            pairs.push(("username", username.clone()));
        }
        if let Some(username2) = &self.username2 {
            pairs.push(("username2", username2.clone()));
        }
        if let Some(order) = &self.order {
            pairs.push(("order", order.clone()));
        }
        pairs
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
