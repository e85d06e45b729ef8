use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::SuggestQuery,
    routes::AppState,
    services::title_search,
};

/// Handler for title suggestions while typing
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestQuery>,
) -> AppResult<Json<Vec<String>>> {
    let catalog = state.catalog.get().await?;
    Ok(Json(title_search::suggest_titles(
        catalog.dramas(),
        &query.q,
        query.limit,
    )))
}
