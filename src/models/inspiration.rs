use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{GeoPoint, Venue, WishlistSuggestion};
use crate::constants::{DEFAULT_MAX_RESULTS, DEFAULT_WISHLIST_ITEMS};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl From<&LocationRequest> for GeoPoint {
    fn from(location: &LocationRequest) -> Self {
        GeoPoint::new(location.latitude, location.longitude)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PreferencesRequest {
    #[serde(default = "default_max_results")]
    #[validate(range(min = 1, max = 20))]
    pub max_results: u32,
    #[validate(range(min = 0.0, max = 5.0))]
    pub min_rating: Option<f64>,
    pub price_level: Option<Vec<String>>,
    #[serde(default)]
    pub open_now: bool,
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WhereInspirationRequest {
    #[validate(length(min = 1))]
    pub what: String,
    /// Accepted for forward compatibility; not used by the search.
    pub when: Option<String>,
    #[validate(nested)]
    pub location: Option<LocationRequest>,
    pub location_radius: Option<f64>,
    #[validate(nested)]
    pub preferences: Option<PreferencesRequest>,
}

#[derive(Debug, Serialize)]
pub struct WhereInspirationResponse {
    pub suggestions: Vec<Venue>,
    pub total_count: usize,
    pub query: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WishlistRequest {
    #[validate(length(min = 1))]
    pub event_name: String,
    #[serde(default = "default_max_items")]
    #[validate(range(min = 1, max = 50))]
    pub max_items: usize,
}

fn default_max_items() -> usize {
    DEFAULT_WISHLIST_ITEMS
}

#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub event_name: String,
    pub items: Vec<String>,
    pub item_count: usize,
}

impl From<WishlistSuggestion> for WishlistResponse {
    fn from(suggestion: WishlistSuggestion) -> Self {
        let item_count = suggestion.item_count();
        Self {
            event_name: suggestion.event_name,
            items: suggestion.items,
            item_count,
        }
    }
}
