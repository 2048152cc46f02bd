use once_cell::sync::Lazy;
use std::path::PathBuf;

pub static CONFIG_PATH: Lazy<PathBuf> = Lazy::new(|| {
    std::env::var("VAMU_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.yaml"))
});

pub const DEFAULT_GOOGLE_PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 30;

pub const PLACES_SEARCH_TEXT_PATH: &str = "/places:searchText";
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Response fields requested from the Places API, grouped by billing tier.
pub const PLACES_FIELDS: &[&str] = &[
    // Essentials
    "places.id",
    "places.name",
    // Pro
    "places.displayName",
    "places.formattedAddress",
    "places.location",
    "places.types",
    "places.viewport",
    "places.googleMapsUri",
    // Enterprise
    "places.rating",
    "places.userRatingCount",
    "places.priceLevel",
    "places.websiteUri",
    "places.nationalPhoneNumber",
    "places.currentOpeningHours",
    "places.businessStatus",
    // Pagination
    "nextPageToken",
];

pub static PLACES_FIELD_MASK: Lazy<String> = Lazy::new(|| PLACES_FIELDS.join(","));

/// Phrases that mark a place name embedded in the free-text query.
pub const LOCATION_KEYWORDS: &[&str] = &[" in ", " near ", " at ", " around "];

pub const DEFAULT_LOCATION_RADIUS_METERS: f64 = 5000.0;
pub const DEFAULT_MAX_RESULTS: u32 = 8;
pub const MAX_RESULT_COUNT_LIMIT: u32 = 20;
pub const DEFAULT_LANGUAGE: &str = "en-US";

pub const DEFAULT_WISHLIST_ITEMS: usize = 10;

pub const COMPLETION_TEMPERATURE: f32 = 1.0;
pub const COMPLETION_MAX_TOKENS: u32 = 1024;
pub const COMPLETION_TOP_P: f32 = 1.0;
