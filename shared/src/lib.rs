pub mod models {
    pub mod replay;
}

pub mod dto {
    pub mod search;
}

pub mod error;
pub mod normalize;
pub mod query;
pub mod replay_id;
pub mod search;

// Re-export commonly used items
pub use error::{SharedError, Result};

pub use models::replay::{Replay, ReplayDetail};

pub use dto::search::{FilterUpdate, SearchFilters, SearchParams, SortOrder};

pub use normalize::to_id;
pub use query::first_or_self;
pub use replay_id::{parse_replay_id, ReplayId};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replay_creation() {
        let replay = Replay {
            id: "gen9ou-2048".to_string(),
            p1: "Alice".to_string(),
            p2: "Bob".to_string(),
            format: "gen9ou".to_string(),
            uploadtime: 1_700_000_000,
            rating: 1500.0,
        };

        assert_eq!(replay.id, "gen9ou-2048");
        assert_eq!(replay.matchup_label(), "Alice vs. Bob");
    }

    #[test]
    fn test_default_filters_are_empty() {
        let filters = SearchFilters::default();
        assert!(filters.format.is_empty());
        assert!(filters.username1.is_empty());
        assert!(filters.username2.is_empty());
        assert_eq!(filters.order, SortOrder::Descending);
    }
}
