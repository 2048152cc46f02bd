//! Outbound clients for the two upstream services.
//!
//! Handlers and orchestration only see the [`PlacesSearch`] and
//! [`WishlistGenerator`] capabilities, so tests can swap in fakes.

mod google_places;
mod groq;

pub use google_places::{parse_place, GooglePlacesClient};
pub use groq::{parse_wishlist_content, GroqClient, WISHLIST_SYSTEM_PROMPT};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{SearchRequest, Venue};

#[async_trait]
pub trait PlacesSearch: Send + Sync {
    async fn search_by_text(&self, request: &SearchRequest) -> AppResult<Vec<Venue>>;
}

#[async_trait]
pub trait WishlistGenerator: Send + Sync {
    /// Items needed for `event_name`, in model order, at most `max_items`.
    async fn generate_wishlist(&self, event_name: &str, max_items: usize)
        -> AppResult<Vec<String>>;
}

fn build_http_client(timeout_seconds: u64) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))
}
