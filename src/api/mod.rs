//! HTTP handlers
//!
//! Each handler reads its query parameters, calls at most one upstream
//! client (two for movies) and answers with JSON. Failures come back as
//! [`ExplorerError`] and are rendered by its `IntoResponse` impl.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use crate::cache::LocationCache;
use crate::error::ErrorBody;
use crate::location_resolver::LocationResolver;
use crate::models::{BusinessReview, LocationRecord, MovieSummary, ParkInfo, WeatherDay};
use crate::services::ServiceClients;
use crate::{ExplorerError, Result};

/// Dependencies shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<dyn LocationCache>,
    pub services: ServiceClients,
}

impl AppState {
    pub fn new(cache: Arc<dyn LocationCache>, services: ServiceClients) -> Self {
        Self { cache, services }
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search_query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    pub formatted_query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewsQuery {
    pub search_query: Option<String>,
    pub page: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/location", get(get_location))
        .route("/weather", get(get_weather))
        .route("/parks", get(get_parks))
        .route("/movies", get(get_movies))
        .route("/yelp", get(get_reviews))
        .route("/get", get(get_cached_locations))
        .fallback(not_found)
        .with_state(state)
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ExplorerError::validation(format!("Missing query parameter '{name}'")))
}

/// 1-based page number, defaulting to the first page
fn parse_page(page: Option<&str>) -> Result<u32> {
    match page.map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(1),
        Some(raw) => raw.parse().map_err(|_| {
            ExplorerError::validation(format!("page must be a positive integer, got '{raw}'"))
        }),
    }
}

#[instrument(skip(state))]
async fn get_location(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<LocationRecord>> {
    let city = required(query.city, "city")?;
    let record =
        LocationResolver::resolve(state.cache.as_ref(), &state.services.geocoder, &city).await?;
    Ok(Json(record))
}

#[instrument(skip(state))]
async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<WeatherDay>>> {
    let city = required(query.search_query, "search_query")?;
    let days = state.services.weather.daily_forecast(&city).await?;
    Ok(Json(days))
}

#[instrument(skip(state))]
async fn get_parks(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ParkInfo>>> {
    let search = required(query.search_query, "search_query")?;
    let parks = state.services.parks.search_parks(&search).await?;
    Ok(Json(parks))
}

#[instrument(skip(state))]
async fn get_movies(
    State(state): State<AppState>,
    Query(query): Query<MoviesQuery>,
) -> Result<Json<Vec<MovieSummary>>> {
    let formatted = required(query.formatted_query, "formatted_query")?;
    let movies = state.services.movies.popular_movies(&formatted).await?;
    Ok(Json(movies))
}

#[instrument(skip(state))]
async fn get_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Json<Vec<BusinessReview>>> {
    let location = required(query.search_query, "search_query")?;
    let page = parse_page(query.page.as_deref())?;
    let reviews = state.services.reviews.search(&location, page).await?;
    Ok(Json(reviews))
}

async fn get_cached_locations(State(state): State<AppState>) -> Result<Json<Vec<LocationRecord>>> {
    let rows = state.cache.all().await?;
    Ok(Json(rows))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::generic()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        assert!(required(None, "city").is_err());
        assert!(required(Some("  ".to_string()), "city").is_err());
        assert_eq!(required(Some("Lima".to_string()), "city").unwrap(), "Lima");
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None).unwrap(), 1);
        assert_eq!(parse_page(Some("")).unwrap(), 1);
        assert_eq!(parse_page(Some("3")).unwrap(), 3);
        assert!(matches!(
            parse_page(Some("abc")),
            Err(ExplorerError::Validation { .. })
        ));
        assert!(parse_page(Some("-2")).is_err());
    }

    #[test]
    fn test_required_names_parameter() {
        let err = required(None, "formatted_query").unwrap_err();
        assert!(err.to_string().contains("formatted_query"));
    }
}
