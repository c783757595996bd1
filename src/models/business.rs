//! Business review record

use serde::{Deserialize, Serialize};

/// A business listing with its review summary
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BusinessReview {
    pub name: String,
    pub image_url: String,
    /// Price band such as `$$`; not every business has one
    pub price: Option<String>,
    pub rating: f64,
    pub url: String,
}
