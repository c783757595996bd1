//! Response records for the City Explorer API
//!
//! Every record is a plain value built per request:
//! - Location: the geocoding result, also the row stored in the cache table
//! - Weather: one day of forecast
//! - Movie, Business, Park: normalized upstream listings

pub mod business;
pub mod location;
pub mod movie;
pub mod park;
pub mod weather;

pub use business::BusinessReview;
pub use location::LocationRecord;
pub use movie::MovieSummary;
pub use park::{ParkAddress, ParkInfo};
pub use weather::WeatherDay;
