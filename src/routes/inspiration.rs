use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::info;

use crate::app::AppState;
use crate::error::AppResult;
use crate::extractors::ValidatedJson;
use crate::inspiration::{build_search_request, suggest_where, suggest_wishlist};
use crate::models::{
    WhereInspirationRequest, WhereInspirationResponse, WishlistRequest, WishlistResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/inspiration/where", post(suggest_where_handler))
        .route("/inspiration/wishlist", post(suggest_wishlist_handler))
        .route("/inspiration/health", get(health_check))
}

async fn suggest_where_handler(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<WhereInspirationRequest>,
) -> AppResult<Json<WhereInspirationResponse>> {
    info!("Received where inspiration request: {}", request.what);

    let search = build_search_request(&request);
    let suggestions = suggest_where(state.places.as_ref(), &search).await?;

    Ok(Json(WhereInspirationResponse {
        total_count: suggestions.len(),
        suggestions,
        query: search.text_query,
    }))
}

async fn suggest_wishlist_handler(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<WishlistRequest>,
) -> AppResult<Json<WishlistResponse>> {
    info!("Received wishlist request: {}", request.event_name);

    let suggestion = suggest_wishlist(
        state.wishlist.as_ref(),
        &request.event_name,
        request.max_items,
    )
    .await?;

    Ok(Json(suggestion.into()))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "inspiration" }))
}
