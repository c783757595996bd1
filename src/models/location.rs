//! Geocoded location record, the row type of the cache table

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A geocoded search term
///
/// Coordinates stay strings, exactly as the geocoder returned them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, FromRow)]
pub struct LocationRecord {
    /// The city name the client searched for
    pub search_query: String,
    /// Full display name from the geocoder
    pub formatted_query: String,
    pub latitude: String,
    pub longitude: String,
}

impl LocationRecord {
    /// Create a new location record
    #[must_use]
    pub fn new(
        search_query: impl Into<String>,
        formatted_query: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        Self {
            search_query: search_query.into(),
            formatted_query: formatted_query.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}
