//! Yelp Fusion business search

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{base_url, fetch_json, null_as_default};
use crate::models::BusinessReview;
use crate::{ExplorerError, Result};

/// Results per page
pub const PAGE_SIZE: u32 = 5;

/// Yelp API client
#[derive(Clone)]
pub struct YelpClient {
    client: Client,
    base_url: String,
    token: String,
}

/// `businesses/search` response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub businesses: Vec<Business>,
}

#[derive(Debug, Deserialize)]
pub struct Business {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    pub price: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

impl From<Business> for BusinessReview {
    fn from(business: Business) -> Self {
        Self {
            name: business.name,
            image_url: business.image_url,
            price: business.price,
            rating: business.rating,
            url: business.url,
        }
    }
}

/// Result offset for a 1-based page.
///
/// Starts at 1, so page 1 skips the first business upstream.
pub fn page_offset(page: u32) -> Result<u32> {
    if page == 0 {
        return Err(ExplorerError::validation("page must be at least 1"));
    }
    (page - 1)
        .checked_mul(PAGE_SIZE)
        .and_then(|skipped| skipped.checked_add(1))
        .ok_or_else(|| ExplorerError::validation(format!("page {page} is out of range")))
}

impl YelpClient {
    pub fn new(client: Client, base: &str, token: &str) -> Self {
        Self {
            client,
            base_url: base_url(base),
            token: token.to_string(),
        }
    }

    /// One page of businesses around a location
    #[instrument(skip(self))]
    pub async fn search(&self, location: &str, page: u32) -> Result<Vec<BusinessReview>> {
        let offset = page_offset(page)?;
        let url = format!(
            "{}/businesses/search?location={}&limit={}&offset={}",
            self.base_url,
            urlencoding::encode(location),
            PAGE_SIZE,
            offset
        );
        debug!("Calling Yelp with offset {}", offset);

        let request = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token));
        let response: SearchResponse = fetch_json("Yelp", request).await?;
        let reviews: Vec<BusinessReview> = response
            .businesses
            .into_iter()
            .map(BusinessReview::from)
            .collect();

        info!("Found {} businesses for '{}' page {}", reviews.len(), location, page);
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1)]
    #[case(2, 6)]
    #[case(3, 11)]
    #[case(10, 46)]
    fn test_page_offset(#[case] page: u32, #[case] expected: u32) {
        assert_eq!(page_offset(page).unwrap(), expected);
    }

    #[test]
    fn test_page_zero_rejected() {
        assert!(matches!(
            page_offset(0),
            Err(ExplorerError::Validation { .. })
        ));
    }

    #[test]
    fn test_page_overflow_rejected() {
        assert!(page_offset(u32::MAX).is_err());
    }

    #[test]
    fn test_business_without_price() {
        let business: Business = serde_json::from_value(serde_json::json!({
            "name": "Pike Place Chowder",
            "image_url": "https://s3-media1.fl.yelpcdn.com/bphoto/ijju-wYoRAxWjHPTCxyQGQ/o.jpg",
            "rating": 4.5,
            "url": "https://www.yelp.com/biz/pike-place-chowder-seattle"
        }))
        .unwrap();

        let review = BusinessReview::from(business);
        assert_eq!(review.name, "Pike Place Chowder");
        assert!(review.price.is_none());
        assert_eq!(review.rating, 4.5);
    }

    #[test]
    fn test_business_with_null_fields() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "businesses": [{
                "name": "Denver Biscuit Co",
                "image_url": null,
                "price": null,
                "rating": null,
                "url": "https://www.yelp.com/biz/denver-biscuit-co-denver"
            }]
        }))
        .unwrap();

        let review = BusinessReview::from(response.businesses.into_iter().next().unwrap());
        assert_eq!(review.image_url, "");
        assert!(review.price.is_none());
        assert_eq!(review.rating, 0.0);
    }
}
