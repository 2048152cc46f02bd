use tracing::{debug, info};

use crate::constants::{DEFAULT_LOCATION_RADIUS_METERS, DEFAULT_MAX_RESULTS, LOCATION_KEYWORDS};
use crate::error::AppResult;
use crate::models::{
    GeoPoint, SearchRequest, Venue, WhereInspirationRequest, WishlistSuggestion,
};
use crate::providers::{PlacesSearch, WishlistGenerator};

/// True when the query names a place itself ("pizza in Milan"). Plain
/// substring scan over the lowercased text; each keyword is space-delimited.
pub fn has_location_in_text(what: &str) -> bool {
    let lowered = what.to_lowercase();
    LOCATION_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Maps an inbound request to Places search parameters.
///
/// Coordinates become a location bias only when the text does not already
/// name a place; otherwise the bias would fight the upstream query parser.
pub fn build_search_request(request: &WhereInspirationRequest) -> SearchRequest {
    let mut search = SearchRequest::new(request.what.clone());

    search.location_bias = match &request.location {
        Some(_) if has_location_in_text(&request.what) => {
            debug!(
                "Skipping locationBias - location detected in text: '{}'",
                request.what
            );
            None
        }
        Some(location) => {
            debug!("Using locationBias from coordinates (no location in text)");
            Some(GeoPoint::from(location))
        }
        None => None,
    };

    search.location_radius = request
        .location_radius
        .filter(|radius| *radius > 0.0)
        .unwrap_or(DEFAULT_LOCATION_RADIUS_METERS);

    match &request.preferences {
        Some(prefs) => {
            search.max_result_count = prefs.max_results;
            search.min_rating = prefs.min_rating;
            search.price_levels = prefs.price_level.clone().filter(|l| !l.is_empty());
            search.is_open_now = prefs.open_now;
        }
        None => search.max_result_count = DEFAULT_MAX_RESULTS,
    }

    search
}

pub async fn suggest_where(
    places: &dyn PlacesSearch,
    search: &SearchRequest,
) -> AppResult<Vec<Venue>> {
    info!("Executing venue suggestion with query: {}", search.text_query);
    places.search_by_text(search).await
}

pub async fn suggest_wishlist(
    generator: &dyn WishlistGenerator,
    event_name: &str,
    max_items: usize,
) -> AppResult<WishlistSuggestion> {
    info!("Executing wishlist suggestion for event: {}", event_name);

    let items = generator.generate_wishlist(event_name, max_items).await?;
    let suggestion = WishlistSuggestion::new(event_name, items);

    info!("Generated {} items for wishlist", suggestion.item_count());
    Ok(suggestion)
}
