#![cfg(test)]

use crate::app::{create_app, AppState};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{GeoPoint, SearchRequest, Venue};
use crate::providers::{PlacesSearch, WishlistGenerator};
use async_trait::async_trait;
use axum::Router;
use std::sync::{Arc, Mutex};

/// Test fixture: a venue with every optional field populated
pub fn sample_venue(index: usize) -> Venue {
    Venue {
        place_id: format!("place-{}", index),
        internal_name: format!("places/place-{}", index),
        display_name: format!("Venue {}", index),
        formatted_address: format!("{} Test Street", index),
        location: GeoPoint::new(45.0 + index as f64 / 100.0, 9.0),
        rating: Some(4.5),
        rating_count: Some(100),
        price_level: Some("PRICE_LEVEL_MODERATE".to_string()),
        category_tags: vec!["restaurant".to_string()],
        business_status: Some("OPERATIONAL".to_string()),
        phone: None,
        website: None,
        currently_open: Some(true),
        opening_hours: None,
        maps_uri: None,
    }
}

/// Base URL of a listener that accepts connections and never answers
pub async fn silent_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

/// Places capability that returns canned venues and records every request
pub struct FakePlaces {
    venues: Vec<Venue>,
    error: Option<fn() -> AppError>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl FakePlaces {
    pub fn with_venues(count: usize) -> Self {
        Self {
            venues: (0..count).map(sample_venue).collect(),
            error: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: fn() -> AppError) -> Self {
        Self {
            venues: Vec::new(),
            error: Some(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn last_request(&self) -> Option<SearchRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PlacesSearch for FakePlaces {
    async fn search_by_text(&self, request: &SearchRequest) -> AppResult<Vec<Venue>> {
        self.requests.lock().unwrap().push(request.clone());
        match self.error {
            Some(make_error) => Err(make_error()),
            None => Ok(self.venues.clone()),
        }
    }
}

/// Wishlist capability that truncates a canned item list like the real client
pub struct FakeWishlist {
    items: Vec<String>,
    error: Option<fn() -> AppError>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl FakeWishlist {
    pub fn with_items(items: &[&str]) -> Self {
        Self {
            items: items.iter().map(|s| s.to_string()).collect(),
            error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: fn() -> AppError) -> Self {
        Self {
            items: Vec::new(),
            error: Some(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn last_call(&self) -> Option<(String, usize)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl WishlistGenerator for FakeWishlist {
    async fn generate_wishlist(
        &self,
        event_name: &str,
        max_items: usize,
    ) -> AppResult<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .push((event_name.to_string(), max_items));
        match self.error {
            Some(make_error) => Err(make_error()),
            None => Ok(self.items.iter().take(max_items).cloned().collect()),
        }
    }
}

/// Create a test app around the given providers
pub fn create_test_app(
    places: Arc<dyn PlacesSearch>,
    wishlist: Arc<dyn WishlistGenerator>,
) -> Router {
    let state = AppState {
        config: Arc::new(Config::default()),
        places,
        wishlist,
    };
    create_app(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_places_records_requests() {
        let places = FakePlaces::with_venues(3);
        let venues = places
            .search_by_text(&SearchRequest::new("bowling"))
            .await
            .unwrap();

        assert_eq!(venues.len(), 3);
        assert_eq!(places.last_request().unwrap().text_query, "bowling");
    }

    #[tokio::test]
    async fn test_fake_wishlist_truncates() {
        let wishlist = FakeWishlist::with_items(&["a", "b", "c"]);
        let items = wishlist.generate_wishlist("Party", 2).await.unwrap();

        assert_eq!(items, vec!["a", "b"]);
        assert_eq!(wishlist.last_call(), Some(("Party".to_string(), 2)));
    }
}
