//! National Park Service parks directory

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{base_url, fetch_json, null_as_default};
use crate::Result;
use crate::models::{ParkAddress, ParkInfo};

/// NPS API client
#[derive(Clone)]
pub struct NpsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// `parks` response
#[derive(Debug, Deserialize)]
pub struct ParksResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Park>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Park {
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub addresses: Vec<Address>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, deserialize_with = "null_as_default")]
    pub line1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub postal_code: String,
}

impl From<Address> for ParkAddress {
    fn from(address: Address) -> Self {
        Self {
            line1: address.line1,
            city: address.city,
            state_code: address.state_code,
            postal_code: address.postal_code,
        }
    }
}

impl From<Park> for ParkInfo {
    fn from(park: Park) -> Self {
        let first_address = park.addresses.into_iter().next().map(ParkAddress::from);
        ParkInfo::new(
            park.full_name,
            first_address.as_ref(),
            park.description,
            park.url,
        )
    }
}

impl NpsClient {
    pub fn new(client: Client, base: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url(base),
            api_key: api_key.to_string(),
        }
    }

    /// Parks matching a free-text query
    #[instrument(skip(self))]
    pub async fn search_parks(&self, query: &str) -> Result<Vec<ParkInfo>> {
        let url = format!(
            "{}/parks?q={}&api_key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        );
        debug!("Calling NPS");

        let response: ParksResponse = fetch_json("NPS", self.client.get(url)).await?;
        let parks: Vec<ParkInfo> = response.data.into_iter().map(ParkInfo::from).collect();

        info!("Found {} parks for '{}'", parks.len(), query);
        Ok(parks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_park_uses_first_address() {
        let response: ParksResponse = serde_json::from_value(serde_json::json!({
            "total": "1",
            "data": [{
                "fullName": "Klondike Gold Rush - Seattle Unit National Historical Park",
                "description": "Seattle flourished during and after the Klondike Gold Rush.",
                "url": "https://www.nps.gov/klse/index.htm",
                "addresses": [
                    {"line1": "319 Second Ave S.", "city": "Seattle", "stateCode": "WA", "postalCode": "98104", "type": "Physical"},
                    {"line1": "PO Box 1", "city": "Tacoma", "stateCode": "WA", "postalCode": "98400", "type": "Mailing"}
                ]
            }]
        }))
        .unwrap();

        let parks: Vec<ParkInfo> = response.data.into_iter().map(ParkInfo::from).collect();
        assert_eq!(parks.len(), 1);
        assert_eq!(parks[0].name, "Klondike Gold Rush - Seattle Unit National Historical Park");
        assert_eq!(parks[0].address, "319 Second Ave S., Seattle, WA 98104");
        assert_eq!(parks[0].fee, "0.00");
        assert_eq!(parks[0].url, "https://www.nps.gov/klse/index.htm");
    }
}
