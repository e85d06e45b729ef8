use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{error::AppResult, models::CatalogStats, routes::AppState};

/// Handler reporting the loaded catalog
pub async fn stats(State(state): State<Arc<AppState>>) -> AppResult<Json<CatalogStats>> {
    let catalog = state.catalog.get().await?;
    Ok(Json(catalog.stats()))
}

/// Handler rebuilding the catalog from the dataset source
pub async fn reload(State(state): State<Arc<AppState>>) -> AppResult<Json<CatalogStats>> {
    let catalog = state.catalog.reload().await?;
    tracing::info!(records = catalog.len(), "Catalog reloaded");
    Ok(Json(catalog.stats()))
}
