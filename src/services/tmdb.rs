//! TMDB popular movies by region

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::{base_url, fetch_json, null_as_default};
use crate::models::MovieSummary;
use crate::models::movie::poster_url;
use crate::{ExplorerError, Result};

/// Country names the geocoder uses that TMDB spells differently
const COUNTRY_SYNONYMS: &[(&str, &str)] = &[("USA", "United States of America")];

/// TMDB API client
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    image_base_url: String,
    api_key: String,
}

/// Entry of `configuration/countries`
#[derive(Debug, Deserialize)]
pub struct Country {
    pub iso_3166_1: String,
    pub english_name: String,
}

/// `discover/movie` response
#[derive(Debug, Deserialize)]
pub struct DiscoverResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
pub struct Movie {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u64,
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
}

impl Movie {
    fn into_summary(self, image_base_url: &str) -> MovieSummary {
        MovieSummary {
            image_url: poster_url(image_base_url, self.poster_path.as_deref()),
            title: self.title,
            overview: self.overview,
            average_votes: self.vote_average,
            total_votes: self.vote_count,
            popularity: self.popularity,
            released_on: self.release_date,
        }
    }
}

/// Country name from a formatted location: its last whitespace-separated
/// token, with known synonyms expanded.
pub fn country_from_query(formatted_query: &str) -> Option<String> {
    let token = formatted_query.split_whitespace().last()?;
    let name = COUNTRY_SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == token)
        .map_or(token, |(_, full)| *full);
    Some(name.to_string())
}

/// ISO 3166-1 code for a country name; the last matching entry wins
pub fn region_code(countries: &[Country], country: &str) -> Option<String> {
    countries
        .iter()
        .rev()
        .find(|c| c.english_name == country)
        .map(|c| c.iso_3166_1.clone())
}

impl TmdbClient {
    pub fn new(client: Client, base: &str, image_base: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url(base),
            image_base_url: image_base.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Popular movies for the country named at the end of `formatted_query`
    #[instrument(skip(self))]
    pub async fn popular_movies(&self, formatted_query: &str) -> Result<Vec<MovieSummary>> {
        let country = country_from_query(formatted_query).ok_or_else(|| {
            ExplorerError::validation("formatted_query must name a country")
        })?;

        let countries = self.countries().await?;
        let region = region_code(&countries, &country);
        match &region {
            Some(code) => debug!("Resolved '{}' to region {}", country, code),
            None => warn!("No TMDB region for '{}', not filtering by region", country),
        }

        let mut url = format!(
            "{}/discover/movie?api_key={}&sort_by=popularity.desc",
            self.base_url,
            urlencoding::encode(&self.api_key)
        );
        if let Some(code) = &region {
            url.push_str(&format!("&region={}", urlencoding::encode(code)));
        }

        let response: DiscoverResponse = fetch_json("TMDB", self.client.get(url)).await?;
        let movies: Vec<MovieSummary> = response
            .results
            .into_iter()
            .map(|movie| movie.into_summary(&self.image_base_url))
            .collect();

        info!("Found {} movies for '{}'", movies.len(), country);
        Ok(movies)
    }

    async fn countries(&self) -> Result<Vec<Country>> {
        let url = format!(
            "{}/configuration/countries?api_key={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        );
        debug!("Calling TMDB country table");
        fetch_json("TMDB", self.client.get(url)).await
    }
}
