use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{ShowcaseQuery, TopDramasQuery, TopDramasResponse},
    routes::AppState,
    services::top_rated,
};

const MAX_TOP_N: usize = 100;

/// Handler for the best rated dramas of one country
pub async fn top(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopDramasQuery>,
) -> AppResult<Json<TopDramasResponse>> {
    let country = query.country.trim();
    if country.is_empty() {
        return Err(AppError::InvalidInput("Country cannot be empty".to_string()));
    }

    let catalog = state.catalog.get().await?;
    let dramas = top_rated::top_dramas(catalog.dramas(), country, query.n.min(MAX_TOP_N));

    tracing::debug!(country = %country, results = dramas.len(), "Top dramas listed");

    Ok(Json(TopDramasResponse {
        country: country.to_string(),
        dramas,
    }))
}

/// Handler listing the top dramas of every showcase country
pub async fn showcase(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ShowcaseQuery>,
) -> AppResult<Json<Vec<TopDramasResponse>>> {
    let catalog = state.catalog.get().await?;
    let lists = top_rated::showcase(
        catalog.dramas(),
        &state.showcase_countries,
        query.n.min(MAX_TOP_N),
    );

    Ok(Json(
        lists
            .into_iter()
            .map(|(country, dramas)| TopDramasResponse { country, dramas })
            .collect(),
    ))
}
