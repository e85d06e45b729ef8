use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendationQuery, RecommendationResponse},
    routes::AppState,
    services::recommendations,
};

/// Handler for similar-title lookups.
///
/// Failures inside the lookup are reported in the `error` field alongside an
/// empty list rather than as an error status.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    if query.title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter a drama title".to_string(),
        ));
    }

    let catalog = state.catalog.get().await?;

    let (recommendations, error) = match recommendations::recommend(&catalog, &query.title) {
        Ok(titles) => (titles, None),
        Err(e) => {
            tracing::error!(request_id = %request_id, title = %query.title, error = %e, "Recommendation failed");
            (vec![], Some(format!("Error in recommendation: {}", e)))
        }
    };

    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        results = recommendations.len(),
        "Recommendation request served"
    );

    Ok(Json(RecommendationResponse {
        title: query.title,
        recommendations,
        error,
    }))
}
