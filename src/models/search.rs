use serde::{Deserialize, Serialize};

use super::GeoPoint;
use crate::constants::{
    DEFAULT_LANGUAGE, DEFAULT_LOCATION_RADIUS_METERS, DEFAULT_MAX_RESULTS,
    MAX_RESULT_COUNT_LIMIT,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankPreference {
    #[default]
    Relevance,
    Distance,
}

/// Parameters of one text search against the Places API.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub text_query: String,
    pub location_bias: Option<GeoPoint>,
    /// Meters.
    pub location_radius: f64,
    pub included_type: Option<String>,
    pub min_rating: Option<f64>,
    pub price_levels: Option<Vec<String>>,
    pub is_open_now: bool,
    pub max_result_count: u32,
    pub language: String,
    pub region_code: Option<String>,
    pub rank_preference: RankPreference,
    pub strict_type_filtering: bool,
}

impl SearchRequest {
    pub fn new(text_query: impl Into<String>) -> Self {
        Self {
            text_query: text_query.into(),
            location_bias: None,
            location_radius: DEFAULT_LOCATION_RADIUS_METERS,
            included_type: None,
            min_rating: None,
            price_levels: None,
            is_open_now: false,
            max_result_count: DEFAULT_MAX_RESULTS,
            language: DEFAULT_LANGUAGE.to_string(),
            region_code: None,
            rank_preference: RankPreference::default(),
            strict_type_filtering: true,
        }
    }

    /// Body of a `places:searchText` call. Absent options are left out
    /// rather than sent as null.
    pub fn to_places_request(&self) -> PlacesTextSearchBody {
        let has_type = self.included_type.is_some();

        PlacesTextSearchBody {
            text_query: self.text_query.clone(),
            max_result_count: self.max_result_count.min(MAX_RESULT_COUNT_LIMIT),
            language_code: self.language.clone(),
            location_bias: self.location_bias.map(|center| LocationBias {
                circle: Circle {
                    center,
                    radius: self.location_radius,
                },
            }),
            included_type: self.included_type.clone(),
            use_strict_type_filtering: has_type.then_some(self.strict_type_filtering),
            min_rating: self.min_rating,
            price_levels: self
                .price_levels
                .clone()
                .filter(|levels| !levels.is_empty()),
            open_now: self.is_open_now.then_some(true),
            region_code: self
                .region_code
                .clone()
                .filter(|code| !code.is_empty()),
            rank_preference: self.rank_preference,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub center: GeoPoint,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationBias {
    pub circle: Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacesTextSearchBody {
    pub text_query: String,
    pub max_result_count: u32,
    pub language_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_bias: Option<LocationBias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_strict_type_filtering: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_levels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    pub rank_preference: RankPreference,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn wire(request: &SearchRequest) -> Value {
        serde_json::to_value(request.to_places_request()).unwrap()
    }

    #[test]
    fn test_minimal_request_omits_optional_keys() {
        let body = wire(&SearchRequest::new("pizza"));

        assert_eq!(
            body,
            json!({
                "textQuery": "pizza",
                "maxResultCount": 8,
                "languageCode": "en-US",
                "rankPreference": "RELEVANCE",
            })
        );
    }

    #[test]
    fn test_max_result_count_is_clamped() {
        let mut request = SearchRequest::new("pizza");

        request.max_result_count = 37;
        assert_eq!(wire(&request)["maxResultCount"], 20);

        request.max_result_count = 5;
        assert_eq!(wire(&request)["maxResultCount"], 5);

        request.max_result_count = 20;
        assert_eq!(wire(&request)["maxResultCount"], 20);
    }

    #[test]
    fn test_location_bias_is_a_circle() {
        let mut request = SearchRequest::new("coffee");
        request.location_bias = Some(GeoPoint::new(45.4642, 9.19));
        request.location_radius = 1200.0;

        assert_eq!(
            wire(&request)["locationBias"],
            json!({
                "circle": {
                    "center": { "latitude": 45.4642, "longitude": 9.19 },
                    "radius": 1200.0,
                }
            })
        );
    }

    #[test]
    fn test_strict_type_filtering_only_with_type() {
        let mut request = SearchRequest::new("dinner");
        request.strict_type_filtering = false;
        let body = wire(&request);
        assert!(body.get("includedType").is_none());
        assert!(body.get("useStrictTypeFiltering").is_none());

        request.included_type = Some("restaurant".to_string());
        let body = wire(&request);
        assert_eq!(body["includedType"], "restaurant");
        assert_eq!(body["useStrictTypeFiltering"], false);
    }

    #[test]
    fn test_filters_are_passed_through() {
        let mut request = SearchRequest::new("brunch");
        request.min_rating = Some(4.0);
        request.price_levels = Some(vec!["PRICE_LEVEL_MODERATE".to_string()]);
        request.is_open_now = true;
        request.region_code = Some("IT".to_string());
        request.rank_preference = RankPreference::Distance;

        let body = wire(&request);
        assert_eq!(body["minRating"], 4.0);
        assert_eq!(body["priceLevels"], json!(["PRICE_LEVEL_MODERATE"]));
        assert_eq!(body["openNow"], true);
        assert_eq!(body["regionCode"], "IT");
        assert_eq!(body["rankPreference"], "DISTANCE");
    }

    #[test]
    fn test_empty_or_false_filters_are_omitted() {
        let mut request = SearchRequest::new("brunch");
        request.price_levels = Some(Vec::new());
        request.is_open_now = false;
        request.region_code = Some(String::new());

        let body = wire(&request);
        assert!(body.get("priceLevels").is_none());
        assert!(body.get("openNow").is_none());
        assert!(body.get("regionCode").is_none());
    }

    #[test]
    fn test_zero_min_rating_is_still_sent() {
        let mut request = SearchRequest::new("bar");
        request.min_rating = Some(0.0);
        assert_eq!(wire(&request)["minRating"], 0.0);
    }
}
