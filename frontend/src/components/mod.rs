pub mod replay_card;
pub mod search_filters;
