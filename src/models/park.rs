//! National park record

use serde::{Deserialize, Serialize};

/// Entrance fee reported for every park
pub const PARK_FEE: &str = "0.00";

/// A national park listing
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ParkInfo {
    pub name: String,
    /// `line1, city, stateCode postalCode` of the first listed address
    pub address: String,
    pub fee: String,
    pub description: String,
    pub url: String,
}

/// Postal address parts used to compose [`ParkInfo::address`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParkAddress {
    pub line1: String,
    pub city: String,
    pub state_code: String,
    pub postal_code: String,
}

impl ParkAddress {
    /// Single-line rendering
    #[must_use]
    pub fn compose(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.line1, self.city, self.state_code, self.postal_code
        )
    }
}

impl ParkInfo {
    /// Create a park record from the first listed address, if any
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        first_address: Option<&ParkAddress>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: first_address.map(ParkAddress::compose).unwrap_or_default(),
            fee: PARK_FEE.to_string(),
            description: description.into(),
            url: url.into(),
        }
    }
}
