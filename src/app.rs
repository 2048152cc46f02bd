use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{error, warn};

use crate::config::Config;
use crate::error::{AppResult, ErrorResponse};
use crate::logging::{panic_message, request_logger};
use crate::providers::{GooglePlacesClient, GroqClient, PlacesSearch, WishlistGenerator};
use crate::routes::api_router;
use crate::VERSION;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub places: Arc<dyn PlacesSearch>,
    pub wishlist: Arc<dyn WishlistGenerator>,
}

impl AppState {
    /// Builds the production providers. Clients are shared by all requests.
    pub fn from_config(config: Arc<Config>) -> AppResult<Self> {
        let places = GooglePlacesClient::new(&config.google_places)?;
        let wishlist = GroqClient::new(&config.groq)?;

        Ok(Self {
            config,
            places: Arc::new(places),
            wishlist: Arc::new(wishlist),
        })
    }
}

#[derive(Serialize)]
struct RootResponse {
    service: String,
    version: String,
    status: String,
}

#[derive(Serialize)]
struct HealthcheckResponse {
    status: String,
    service: String,
    version: String,
}

async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        service: state.config.app_name.clone(),
        version: VERSION.to_string(),
        status: "running".to_string(),
    })
}

async fn healthcheck(State(state): State<AppState>) -> Json<HealthcheckResponse> {
    Json(HealthcheckResponse {
        status: "healthy".to_string(),
        service: state.config.app_name.clone(),
        version: VERSION.to_string(),
    })
}

fn cors_layer(config: &Config) -> CorsLayer {
    let configured = config.cors.origins_list();
    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    // Browsers reject credentialed responses for a wildcard origin.
    if configured.iter().any(|origin| origin == "*") {
        warn!("CORS allows any origin; credentials are disabled");
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = configured
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(origins).allow_credentials(true)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    error!(
        "Unhandled panic while serving request: {}",
        panic_message(err.as_ref())
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal()),
    )
        .into_response()
}

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(root))
        .route("/health", get(healthcheck))
        .nest("/api/v1", api_router())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}
