use serde::{Deserialize, Serialize};

pub const DEFAULT_EPISODES: u32 = 12;
pub const DEFAULT_DURATION: &str = "45 min";
pub const DEFAULT_RATING: &str = "5.7/10 (MDL)";
pub const DEFAULT_RELEASE_DATE: &str = "2021-01-01";

/// Columns every dataset must provide
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Title",
    "Country",
    "Rating",
    "Episodes",
    "Duration",
    "Release Date",
    "Genres",
    "Themes",
    "Summary",
];

/// One row of the source CSV, as found
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DramaRow {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Rating")]
    pub rating: Option<String>,
    #[serde(rename = "Episodes")]
    pub episodes: Option<String>,
    #[serde(rename = "Duration")]
    pub duration: Option<String>,
    #[serde(rename = "Release Date")]
    pub release_date: Option<String>,
    #[serde(rename = "Genres")]
    pub genres: Option<String>,
    #[serde(rename = "Themes")]
    pub themes: Option<String>,
    #[serde(rename = "Summary")]
    pub summary: Option<String>,
    #[serde(rename = "Poster_URL", default)]
    pub poster_url: Option<String>,
}

/// A drama in the catalog, with defaults applied and derived fields filled in
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Drama {
    pub title: String,
    pub country: String,
    pub rating: String,
    pub numeric_rating: Option<f64>,
    pub episodes: u32,
    pub duration: String,
    pub release_date: String,
    pub genres: String,
    pub themes: String,
    pub summary: String,
    pub poster_url: Option<String>,
    /// Lowercased summary, genres and themes
    #[serde(skip)]
    pub tags: String,
    /// `tags` with every token stemmed
    #[serde(skip)]
    pub normalized_tags: String,
}

impl Drama {
    pub fn has_country(&self, country: &str) -> bool {
        self.country
            .to_lowercase()
            .contains(&country.to_lowercase())
    }
}
