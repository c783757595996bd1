//! City Explorer - location, weather, parks, movies and reviews for a city
//!
//! This library provides the HTTP handlers, upstream service clients and
//! location cache behind the City Explorer API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod services;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use cache::{LocationCache, MemoryLocationCache, PgLocationCache};
pub use config::ExplorerConfig;
pub use error::ExplorerError;
pub use models::{BusinessReview, LocationRecord, MovieSummary, ParkInfo, WeatherDay};
pub use services::ServiceClients;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
