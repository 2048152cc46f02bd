use serde::{Deserialize, Serialize};

use super::GeoPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(rename = "open_now")]
    pub currently_open: Option<bool>,
    #[serde(rename = "weekday_descriptions")]
    pub weekday_text: Vec<String>,
}

/// A place result normalized from the Places API.
///
/// Field names on the wire follow the public response schema, which predates
/// the internal names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub place_id: String,
    #[serde(rename = "name")]
    pub internal_name: String,
    pub display_name: String,
    #[serde(rename = "address")]
    pub formatted_address: String,
    pub location: GeoPoint,
    pub rating: Option<f64>,
    #[serde(rename = "total_ratings")]
    pub rating_count: Option<u64>,
    pub price_level: Option<String>,
    #[serde(rename = "types")]
    pub category_tags: Vec<String>,
    pub business_status: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    #[serde(rename = "is_open_now")]
    pub currently_open: Option<bool>,
    pub opening_hours: Option<OpeningHours>,
    #[serde(rename = "google_maps_uri")]
    pub maps_uri: Option<String>,
}
