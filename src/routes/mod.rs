use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::CatalogCache,
};

pub mod catalog;
pub mod dramas;
pub mod recommendations;
pub mod titles;

/// Shared state handed to every handler
pub struct AppState {
    pub catalog: Arc<CatalogCache>,
    pub showcase_countries: Vec<String>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogCache>, showcase_countries: Vec<String>) -> Self {
        Self {
            catalog,
            showcase_countries,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", get(recommendations::recommend))
        .route("/dramas/top", get(dramas::top))
        .route("/dramas/showcase", get(dramas::showcase))
        .route("/titles/suggest", get(titles::suggest))
        .route("/catalog", get(catalog::stats))
        .route("/catalog/reload", post(catalog::reload))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
