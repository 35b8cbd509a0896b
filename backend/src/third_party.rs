pub mod replay_api;


// Re-export commonly used services for convenience
pub use replay_api::{ReplayApiError, ReplayApiService};
