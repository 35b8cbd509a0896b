pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod third_party;
pub mod replay {
    pub mod controller;
    pub mod query;
    pub mod render;
    pub mod repository;

    pub use controller::{configure_routes, RenderSettings};
    pub use repository::{ReplayRepository, ReplayRepositoryImpl};
}


#[cfg(test)]
mod replay_controller_tests;
