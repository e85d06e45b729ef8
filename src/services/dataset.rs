//! Dataset loading.
//!
//! The catalog is built from a single CSV resource, fetched over HTTP or read
//! from disk. Loading fails as a whole: a missing column or an unreachable
//! source is an error, never a partially filled catalog.

use std::collections::HashSet;
use std::path::PathBuf;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{
        Drama, DramaRow, DEFAULT_DURATION, DEFAULT_EPISODES, DEFAULT_RATING,
        DEFAULT_RELEASE_DATE, REQUIRED_COLUMNS,
    },
    services::{
        rating::extract_numeric_rating,
        text::{derive_tags, normalize_tags, TokenStemmer},
    },
};

/// Where the raw CSV comes from
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DatasetSource: Send + Sync {
    /// Returns the full CSV document
    async fn fetch(&self) -> AppResult<String>;

    /// Source description for logging
    fn describe(&self) -> String;
}

/// CSV served over HTTP, e.g. a spreadsheet export link
pub struct RemoteCsvSource {
    http_client: HttpClient,
    url: String,
}

impl RemoteCsvSource {
    pub fn new(url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            url,
        }
    }
}

#[async_trait::async_trait]
impl DatasetSource for RemoteCsvSource {
    async fn fetch(&self) -> AppResult<String> {
        let response = self.http_client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::Dataset(format!(
                "{} returned status {}",
                self.url,
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// CSV file on local disk
pub struct FileCsvSource {
    path: PathBuf,
}

impl FileCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl DatasetSource for FileCsvSource {
    async fn fetch(&self) -> AppResult<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// CSV document held in memory
pub struct InlineCsvSource(pub String);

#[async_trait::async_trait]
impl DatasetSource for InlineCsvSource {
    async fn fetch(&self) -> AppResult<String> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "inline".to_string()
    }
}

/// Parses the CSV into deduplicated dramas with defaults and derived fields applied
pub fn parse_dramas(csv_text: &str, stemmer: &dyn TokenStemmer) -> AppResult<Vec<Drama>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AppError::MissingColumn(column.to_string()));
        }
    }

    let mut seen = HashSet::new();
    let mut dramas = Vec::new();

    for (line, row) in reader.deserialize::<DramaRow>().enumerate() {
        let row = row?;

        let Some(title) = present(row.title.clone()) else {
            tracing::warn!(row = line + 1, "Skipping row without a title");
            continue;
        };

        if !seen.insert(title.clone()) {
            tracing::debug!(title = %title, "Dropping duplicate title");
            continue;
        }

        dramas.push(build_drama(title, row, stemmer));
    }

    Ok(dramas)
}

fn build_drama(title: String, row: DramaRow, stemmer: &dyn TokenStemmer) -> Drama {
    let rating = present(row.rating).unwrap_or_else(|| DEFAULT_RATING.to_string());
    let episodes = match present(row.episodes) {
        Some(raw) => parse_episodes(&raw).unwrap_or_else(|| {
            tracing::warn!(title = %title, episodes = %raw, "Unparseable episode count, using default");
            DEFAULT_EPISODES
        }),
        None => DEFAULT_EPISODES,
    };

    let summary = row.summary.unwrap_or_default();
    let genres = row.genres.unwrap_or_default();
    let themes = row.themes.unwrap_or_default();
    let tags = derive_tags(&summary, &genres, &themes);
    let normalized_tags = normalize_tags(&tags, stemmer);

    Drama {
        numeric_rating: extract_numeric_rating(&rating),
        title,
        country: row.country.unwrap_or_default(),
        rating,
        episodes,
        duration: present(row.duration).unwrap_or_else(|| DEFAULT_DURATION.to_string()),
        release_date: present(row.release_date)
            .unwrap_or_else(|| DEFAULT_RELEASE_DATE.to_string()),
        genres,
        themes,
        summary,
        poster_url: present(row.poster_url),
        tags,
        normalized_tags,
    }
}

/// Treats blank cells as missing
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accepts "16" as well as float-formatted counts like "16.0"
fn parse_episodes(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    raw.parse::<u32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
            .map(|v| v as u32)
    })
}
