use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod drama;

pub use drama::{
    Drama, DramaRow, DEFAULT_DURATION, DEFAULT_EPISODES, DEFAULT_RATING, DEFAULT_RELEASE_DATE,
    REQUIRED_COLUMNS,
};

/// Query for similar titles
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
}

/// Similar titles for a query; `error` is set when the lookup failed internally
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub title: String,
    pub recommendations: Vec<String>,
    pub error: Option<String>,
}

/// Query for the best rated dramas of a country
#[derive(Debug, Deserialize)]
pub struct TopDramasQuery {
    pub country: String,
    #[serde(default = "default_top_n")]
    pub n: usize,
}

#[derive(Debug, Deserialize)]
pub struct ShowcaseQuery {
    #[serde(default = "default_top_n")]
    pub n: usize,
}

fn default_top_n() -> usize {
    5
}

#[derive(Debug, Serialize)]
pub struct TopDramasResponse {
    pub country: String,
    pub dramas: Vec<Drama>,
}

/// Query for title suggestions while typing
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    pub q: String,
    #[serde(default = "default_suggest_limit")]
    pub limit: usize,
}

fn default_suggest_limit() -> usize {
    10
}

/// Summary of the currently loaded catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    pub records: usize,
    pub vocabulary: usize,
    pub built_at: DateTime<Utc>,
}
