//! Location Resolution Module
//!
//! Read-through lookup of city names: the cache table first, the geocoder
//! on a miss.

use tracing::{debug, warn};

use crate::Result;
use crate::cache::LocationCache;
use crate::models::LocationRecord;
use crate::services::LocationIqClient;

/// Service for resolving city names into geocoded records
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a city, geocoding and storing it on a cache miss.
    ///
    /// A failed cache write is logged and the fresh record is still returned.
    pub async fn resolve(
        cache: &dyn LocationCache,
        geocoder: &LocationIqClient,
        city: &str,
    ) -> Result<LocationRecord> {
        if let Some(cached) = cache.find(city).await? {
            debug!("Cache hit for '{}'", city);
            return Ok(cached);
        }

        debug!("Cache miss for '{}', geocoding", city);
        let record = geocoder.geocode(city).await?;

        if let Err(e) = cache.insert(&record).await {
            warn!("Failed to cache location '{}': {}", city, e);
        }

        Ok(record)
    }
}
