//! Upstream service clients
//!
//! One client per third-party API. They share a single `reqwest::Client`
//! and a common request helper that maps transport failures, bad statuses
//! and undecodable bodies onto [`ExplorerError::Api`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::config::ExplorerConfig;
use crate::{ExplorerError, Result};

pub mod locationiq;
pub mod nps;
pub mod tmdb;
pub mod weatherbit;
pub mod yelp;

pub use locationiq::LocationIqClient;
pub use nps::NpsClient;
pub use tmdb::TmdbClient;
pub use weatherbit::WeatherbitClient;
pub use yelp::YelpClient;

/// All upstream clients, built from one configuration
#[derive(Clone)]
pub struct ServiceClients {
    pub geocoder: LocationIqClient,
    pub weather: WeatherbitClient,
    pub parks: NpsClient,
    pub movies: TmdbClient,
    pub reviews: YelpClient,
}

impl ServiceClients {
    /// Build the shared HTTP client and every service client on top of it
    pub fn new(config: &ExplorerConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_seconds.into()))
            .user_agent(config.http.user_agent.as_str());
        if !config.http.use_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| ExplorerError::config(format!("Failed to create HTTP client: {e}")))?;

        let services = &config.services;
        Ok(Self {
            geocoder: LocationIqClient::new(
                client.clone(),
                &services.locationiq_url,
                &config.location_key,
            ),
            weather: WeatherbitClient::new(
                client.clone(),
                &services.weatherbit_url,
                &config.weather_key,
            ),
            parks: NpsClient::new(client.clone(), &services.nps_url, &config.park_key),
            movies: TmdbClient::new(
                client.clone(),
                &services.tmdb_url,
                &services.tmdb_image_url,
                &config.movie_api_key,
            ),
            reviews: YelpClient::new(client, &services.yelp_url, &config.yelp_api_key),
        })
    }
}

/// Send a prepared request and decode the JSON body
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    service: &str,
    request: RequestBuilder,
) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| {
            ExplorerError::api(format!("{service} request failed: {}", e.without_url()))
        })?;

    let status = response.status();
    debug!("{} responded with {}", service, status);

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        warn!("{} returned {}: {}", service, status, error_text);
        return Err(match status.as_u16() {
            401 | 403 => ExplorerError::api(format!("{service} rejected the API key")),
            429 => ExplorerError::api(format!("{service} rate limit exceeded")),
            _ => ExplorerError::api(format!("{service} error {status}")),
        });
    }

    response.json().await.map_err(|e| {
        ExplorerError::api(format!(
            "Failed to parse {service} response: {}",
            e.without_url()
        ))
    })
}

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strip a trailing slash so paths can be appended with `/`
pub(crate) fn base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trims_slash() {
        assert_eq!(base_url("https://api.yelp.com/v3/"), "https://api.yelp.com/v3");
        assert_eq!(base_url("https://api.yelp.com/v3"), "https://api.yelp.com/v3");
    }

    #[derive(Debug, serde::Deserialize)]
    struct Listing {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        score: f64,
    }

    #[test]
    fn test_null_as_default() {
        let nulls: Listing =
            serde_json::from_value(serde_json::json!({"name": null, "score": null})).unwrap();
        assert_eq!(nulls.name, "");
        assert_eq!(nulls.score, 0.0);

        let missing: Listing = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(missing.name, "");

        let present: Listing =
            serde_json::from_value(serde_json::json!({"name": "Zoo", "score": 4.5})).unwrap();
        assert_eq!(present.name, "Zoo");
        assert_eq!(present.score, 4.5);
    }

    #[test]
    fn test_clients_build_from_default_config() {
        assert!(ServiceClients::new(&ExplorerConfig::default()).is_ok());
    }
}
