//! Weatherbit daily forecast

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{base_url, fetch_json};
use crate::Result;
use crate::models::WeatherDay;

/// Number of forecast days requested
pub const FORECAST_DAYS: usize = 5;

/// Weatherbit API client
#[derive(Clone)]
pub struct WeatherbitClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// `forecast/daily` response
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub data: Vec<DailyForecast>,
}

#[derive(Debug, Deserialize)]
pub struct DailyForecast {
    /// Local date, `YYYY-MM-DD`
    pub datetime: String,
    pub weather: Conditions,
}

#[derive(Debug, Deserialize)]
pub struct Conditions {
    pub description: String,
}

impl From<DailyForecast> for WeatherDay {
    fn from(day: DailyForecast) -> Self {
        WeatherDay::new(day.weather.description, &day.datetime)
    }
}

impl WeatherbitClient {
    pub fn new(client: Client, base: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url(base),
            api_key: api_key.to_string(),
        }
    }

    /// Five-day forecast for a city, in upstream order
    #[instrument(skip(self))]
    pub async fn daily_forecast(&self, city: &str) -> Result<Vec<WeatherDay>> {
        let url = format!(
            "{}/forecast/daily?key={}&city={}&days={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(city),
            FORECAST_DAYS
        );
        debug!("Calling Weatherbit");

        let response: ForecastResponse = fetch_json("Weatherbit", self.client.get(url)).await?;
        let days = to_weather_days(response);

        info!("Retrieved {} forecast days for '{}'", days.len(), city);
        Ok(days)
    }
}

fn to_weather_days(response: ForecastResponse) -> Vec<WeatherDay> {
    response
        .data
        .into_iter()
        .take(FORECAST_DAYS)
        .map(WeatherDay::from)
        .collect()
}
