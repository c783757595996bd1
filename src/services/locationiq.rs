//! LocationIQ forward geocoding

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{base_url, fetch_json};
use crate::models::LocationRecord;
use crate::{ExplorerError, Result};

/// LocationIQ API client
#[derive(Clone)]
pub struct LocationIqClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// One entry of the `search.php` response
#[derive(Debug, Deserialize)]
pub struct Place {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

impl LocationIqClient {
    pub fn new(client: Client, base: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url(base),
            api_key: api_key.to_string(),
        }
    }

    /// Geocode a city name, keeping only the best match
    #[instrument(skip(self))]
    pub async fn geocode(&self, city: &str) -> Result<LocationRecord> {
        let url = format!(
            "{}/search.php?key={}&q={}&format=json",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(city)
        );
        debug!("Calling LocationIQ");

        let places: Vec<Place> = fetch_json("LocationIQ", self.client.get(url)).await?;
        let record = first_place(city, places)?;

        info!(
            "Geocoded '{}' to {} ({}, {})",
            city, record.formatted_query, record.latitude, record.longitude
        );
        Ok(record)
    }
}

/// Build the cache record from the first geocoding result
fn first_place(city: &str, places: Vec<Place>) -> Result<LocationRecord> {
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| ExplorerError::not_found(format!("No location found for '{city}'")))?;

    Ok(LocationRecord::new(
        city,
        place.display_name,
        place.lat,
        place.lon,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_place_wins() {
        let places: Vec<Place> = serde_json::from_value(serde_json::json!([
            {"place_id": "1", "display_name": "Lynnwood, Snohomish County, Washington, USA", "lat": "47.8209", "lon": "-122.3151"},
            {"place_id": "2", "display_name": "Lynnwood, Pennsylvania, USA", "lat": "40.0", "lon": "-75.0"}
        ]))
        .unwrap();

        let record = first_place("lynnwood", places).unwrap();
        assert_eq!(record.search_query, "lynnwood");
        assert_eq!(record.formatted_query, "Lynnwood, Snohomish County, Washington, USA");
        assert_eq!(record.latitude, "47.8209");
        assert_eq!(record.longitude, "-122.3151");
    }

    #[test]
    fn test_empty_result_is_not_found() {
        let err = first_place("atlantis", Vec::new()).unwrap_err();
        assert!(matches!(err, ExplorerError::NotFound { .. }));
    }
}
