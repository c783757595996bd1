//! Daily forecast record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display format of [`WeatherDay::time`], e.g. `Sat Oct 17 2026`
pub const DATE_DISPLAY_FORMAT: &str = "%a %b %d %Y";

/// One day of forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WeatherDay {
    /// Human-readable description of the day's weather
    pub forecast: String,
    /// Human-readable date
    pub time: String,
}

impl WeatherDay {
    /// Build a day from a description and an upstream `YYYY-MM-DD` date.
    ///
    /// A date that does not parse is kept verbatim.
    #[must_use]
    pub fn new(forecast: impl Into<String>, date: &str) -> Self {
        let time = match format_date(date) {
            Some(formatted) => formatted,
            None => {
                tracing::warn!("Unparseable forecast date '{}'", date);
                date.to_string()
            }
        };

        Self {
            forecast: forecast.into(),
            time,
        }
    }
}

/// Render an ISO date (`2026-10-17`) as `Sat Oct 17 2026`
#[must_use]
pub fn format_date(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.format(DATE_DISPLAY_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2026-10-17", "Sat Oct 17 2026")]
    #[case("2020-02-29", "Sat Feb 29 2020")]
    #[case("2021-01-04", "Mon Jan 04 2021")]
    fn test_format_date(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_date(input).as_deref(), Some(expected));
    }

    #[test]
    fn test_format_date_rejects_garbage() {
        assert!(format_date("tomorrow").is_none());
        assert!(format_date("2021-13-01").is_none());
    }

    #[test]
    fn test_weather_day_keeps_unparseable_date() {
        let day = WeatherDay::new("Light rain", "2021:01:04");
        assert_eq!(day.forecast, "Light rain");
        assert_eq!(day.time, "2021:01:04");
    }

    #[test]
    fn test_weather_day_round_trips_through_display_format() {
        let day = WeatherDay::new("Few clouds", "2026-10-17");
        assert!(NaiveDate::parse_from_str(&day.time, DATE_DISPLAY_FORMAT).is_ok());
    }
}
