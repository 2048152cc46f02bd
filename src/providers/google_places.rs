use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error, info};

use super::{build_http_client, PlacesSearch};
use crate::config::GooglePlacesConfig;
use crate::constants::{PLACES_FIELD_MASK, PLACES_SEARCH_TEXT_PATH};
use crate::error::{AppError, AppResult};
use crate::models::{GeoPoint, OpeningHours, SearchRequest, Venue};

/// Text Search client for the Google Places API (v1).
#[derive(Clone)]
pub struct GooglePlacesClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GooglePlacesClient {
    pub fn new(config: &GooglePlacesConfig) -> AppResult<Self> {
        Ok(Self {
            client: build_http_client(config.timeout_seconds)?,
            api_key: config.api_key.clone(),
            endpoint: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                PLACES_SEARCH_TEXT_PATH
            ),
        })
    }
}

#[async_trait]
impl PlacesSearch for GooglePlacesClient {
    async fn search_by_text(&self, request: &SearchRequest) -> AppResult<Vec<Venue>> {
        let body = request.to_places_request();

        info!("Searching Google Places: {}", body.text_query);
        debug!("Full Google Places request body: {:?}", body);

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", PLACES_FIELD_MASK.as_str())
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if let Some(err) = status_error(status, &text) {
            error!("{}", err);
            return Err(err);
        }

        let data: Value = serde_json::from_str(&text).map_err(|e| {
            error!("Google Places API returned an unreadable body: {}", e);
            AppError::upstream(
                format!("Google Places API returned an invalid body: {}", e),
                Some(status.as_u16()),
            )
        })?;

        let venues: Vec<Venue> = data
            .get("places")
            .and_then(Value::as_array)
            .map(|places| places.iter().map(parse_place).collect())
            .unwrap_or_default();

        info!("Found {} venues", venues.len());
        Ok(venues)
    }
}

fn status_error(status: StatusCode, body: &str) -> Option<AppError> {
    match status.as_u16() {
        429 => Some(AppError::RateLimit(
            "Google Places API rate limit exceeded".to_string(),
        )),
        code @ (401 | 403) => Some(AppError::Authentication(format!(
            "Google Places API authentication failed ({})",
            code
        ))),
        code if code >= 400 => {
            let message = serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|v| {
                    v.pointer("/error/message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "Unknown error".to_string());
            Some(AppError::upstream(
                format!("Google Places API error: {}", message),
                Some(code),
            ))
        }
        _ => None,
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        error!("Google Places API timeout: {}", err);
        AppError::upstream("Request timeout", None)
    } else {
        error!("HTTP error calling Google Places API: {}", err);
        AppError::upstream(format!("HTTP error: {}", err), None)
    }
}

fn string_field(place: &Value, key: &str) -> Option<String> {
    place.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Normalizes one raw `places[]` item. Missing or mistyped fields fall back
/// to defaults; this never fails.
pub fn parse_place(place: &Value) -> Venue {
    let location = GeoPoint::new(
        place
            .pointer("/location/latitude")
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
        place
            .pointer("/location/longitude")
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
    );

    let hours = place
        .get("currentOpeningHours")
        .filter(|block| block.as_object().is_some_and(|o| !o.is_empty()));

    let currently_open = hours.and_then(|h| h.get("openNow")).and_then(Value::as_bool);

    let opening_hours = hours.map(|h| OpeningHours {
        currently_open,
        weekday_text: string_list(h.get("weekdayDescriptions")),
    });

    Venue {
        place_id: string_field(place, "id").unwrap_or_default(),
        internal_name: string_field(place, "name").unwrap_or_default(),
        display_name: place
            .pointer("/displayName/text")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string(),
        formatted_address: string_field(place, "formattedAddress").unwrap_or_default(),
        location,
        rating: place.get("rating").and_then(Value::as_f64),
        rating_count: place.get("userRatingCount").and_then(Value::as_u64),
        price_level: string_field(place, "priceLevel"),
        category_tags: string_list(place.get("types")),
        business_status: string_field(place, "businessStatus"),
        phone: string_field(place, "nationalPhoneNumber"),
        website: string_field(place, "websiteUri"),
        currently_open,
        opening_hours,
        maps_uri: string_field(place, "googleMapsUri"),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
