use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::{
    error::{AppError, AppResult},
    models::{CatalogStats, Drama},
    services::{
        dataset::{parse_dramas, DatasetSource},
        similarity::SimilarityMatrix,
        text::TokenStemmer,
        vectorize::CountVectorizer,
    },
};

/// Deduplicated dramas together with their pairwise similarity.
///
/// Row `i` of the matrix belongs to `dramas[i]`. Immutable once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    dramas: Vec<Drama>,
    similarity: SimilarityMatrix,
    vocabulary_size: usize,
    built_at: DateTime<Utc>,
}

impl Catalog {
    /// Vectorizes the normalized tags and computes the similarity matrix
    pub fn from_dramas(dramas: Vec<Drama>) -> Self {
        let documents: Vec<&str> = dramas.iter().map(|d| d.normalized_tags.as_str()).collect();

        // Vocabulary is capped at one term per record
        let mut vectorizer = CountVectorizer::new().with_max_features(dramas.len());
        let vectors = vectorizer.fit_transform(&documents);
        let similarity = SimilarityMatrix::from_vectors(&vectors);

        Self {
            vocabulary_size: vectorizer.vocabulary_size(),
            dramas,
            similarity,
            built_at: Utc::now(),
        }
    }

    /// Fetches, parses and indexes the dataset
    pub async fn load(source: &dyn DatasetSource, stemmer: &dyn TokenStemmer) -> AppResult<Self> {
        tracing::info!(source = %source.describe(), "Loading drama dataset");

        let csv_text = source.fetch().await?;
        let dramas = parse_dramas(&csv_text, stemmer)?;
        let catalog = Self::from_dramas(dramas);

        tracing::info!(
            records = catalog.len(),
            vocabulary = catalog.vocabulary_size,
            "Similarity index built"
        );

        Ok(catalog)
    }

    pub fn dramas(&self) -> &[Drama] {
        &self.dramas
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn len(&self) -> usize {
        self.dramas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dramas.is_empty()
    }

    /// Index of the drama whose title matches case-insensitively
    pub fn position(&self, title: &str) -> Option<usize> {
        let wanted = title.to_lowercase();
        self.dramas
            .iter()
            .position(|d| d.title.to_lowercase() == wanted)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            records: self.len(),
            vocabulary: self.vocabulary_size,
            built_at: self.built_at,
        }
    }
}

/// Builds the catalog at most once and hands out shared read-only copies.
///
/// Concurrent first callers wait on the build lock; only one of them runs the
/// build. `invalidate` and `reload` replace the cached catalog without
/// disturbing callers still holding the previous `Arc`.
pub struct CatalogCache {
    source: Arc<dyn DatasetSource>,
    stemmer: Arc<dyn TokenStemmer>,
    current: RwLock<Option<Arc<Catalog>>>,
    build_lock: Mutex<()>,
}

impl CatalogCache {
    pub fn new(source: Arc<dyn DatasetSource>, stemmer: Arc<dyn TokenStemmer>) -> Self {
        Self {
            source,
            stemmer,
            current: RwLock::new(None),
            build_lock: Mutex::new(()),
        }
    }

    /// Cache already holding a built catalog
    pub fn prebuilt(
        catalog: Catalog,
        source: Arc<dyn DatasetSource>,
        stemmer: Arc<dyn TokenStemmer>,
    ) -> Self {
        Self {
            source,
            stemmer,
            current: RwLock::new(Some(Arc::new(catalog))),
            build_lock: Mutex::new(()),
        }
    }

    /// Returns the cached catalog, building it on first use
    pub async fn get(&self) -> AppResult<Arc<Catalog>> {
        if let Some(catalog) = self.current.read().await.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let _guard = self.build_lock.lock().await;

        // Another caller may have finished the build while we waited
        if let Some(catalog) = self.current.read().await.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let catalog = Arc::new(Catalog::load(self.source.as_ref(), self.stemmer.as_ref()).await?);
        *self.current.write().await = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Drops the cached catalog; the next `get` rebuilds it
    pub async fn invalidate(&self) {
        let _guard = self.build_lock.lock().await;
        *self.current.write().await = None;
        tracing::info!("Catalog cache invalidated");
    }

    /// Rebuilds eagerly. On failure the previous catalog stays in place.
    pub async fn reload(&self) -> AppResult<Arc<Catalog>> {
        let _guard = self.build_lock.lock().await;

        match Catalog::load(self.source.as_ref(), self.stemmer.as_ref()).await {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                *self.current.write().await = Some(Arc::clone(&catalog));
                Ok(catalog)
            }
            Err(e) => {
                tracing::error!(error = %e, "Catalog reload failed, keeping previous catalog");
                Err(e)
            }
        }
    }

    pub async fn is_built(&self) -> bool {
        self.current.read().await.is_some()
    }
}

/// Guards against a catalog whose matrix does not line up with its records
pub(crate) fn ensure_consistent(catalog: &Catalog) -> AppResult<()> {
    if catalog.similarity.len() != catalog.dramas.len() {
        return Err(AppError::Internal(format!(
            "similarity matrix has {} rows for {} dramas",
            catalog.similarity.len(),
            catalog.dramas.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::services::dataset::MockDatasetSource;
    use crate::services::text::EnglishStemmer;

    pub const FIXTURE: &str = "\
Title,Country,Rating,Episodes,Duration,Release Date,Genres,Themes,Summary
Semantic Error,South Korea,8.4/10 (MDL),8,25 min,2022-02-16,Romance Comedy,Campus-Romance,A rigid student clashes with a free spirited designer at university
Light On Me,South Korea,7.0/10,8,25 min,2021-03-16,Romance Youth,High-School,A lonely student joins the student council at high school
Cherry Magic,Japan,8.1/10,12,24 min,2020-10-08,Romance Comedy,Office-Romance,An office worker gains the magic to read the minds of coworkers
Until We Meet Again,Taiwan,8.8/10,17,50 min,2019-10-07,Romance Drama,Reincarnation,Two university students fall in love across lifetimes
2gether,Thailand,N/A,13,60 min,2020-02-21,Romance Comedy,Campus-Romance,A university student pretends to date a guitarist
Kinnporsche,Thailand,8.7/10,14,60 min,2022-04-02,Action Romance,Mafia,A bodyguard works for a powerful mafia family
Blank Slate,Japan,,4,30 min,,,,the and of
Semantic Error,Japan,1.0/10,1,1 min,2000-01-01,Horror,,Duplicate row
";

    pub fn fixture_catalog() -> Catalog {
        Catalog::from_dramas(parse_dramas(FIXTURE, &EnglishStemmer).unwrap())
    }

    /// Catalog whose matrix covers fewer rows than it has dramas
    pub fn mismatched_catalog() -> Catalog {
        let mut catalog = fixture_catalog();
        catalog.similarity = SimilarityMatrix::from_vectors(&ndarray::Array2::<f64>::eye(3));
        catalog
    }

    fn mock_source(times: usize) -> MockDatasetSource {
        let mut source = MockDatasetSource::new();
        source
            .expect_fetch()
            .times(times)
            .returning(|| Ok(FIXTURE.to_string()));
        source
            .expect_describe()
            .returning(|| "mock".to_string());
        source
    }

    #[test]
    fn test_catalog_dimensions() {
        let catalog = fixture_catalog();
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.similarity().len(), 7);
        assert!(catalog.stats().vocabulary <= 7);
        assert!(ensure_consistent(&catalog).is_ok());
    }

    #[test]
    fn test_mismatched_matrix_is_internal_error() {
        let catalog = mismatched_catalog();
        assert!(matches!(ensure_consistent(&catalog), Err(AppError::Internal(_))));
        assert!(matches!(
            crate::services::recommendations::recommend(&catalog, "Semantic Error"),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_position_is_case_insensitive() {
        let catalog = fixture_catalog();
        assert_eq!(catalog.position("semantic error"), Some(0));
        assert_eq!(catalog.position("CHERRY MAGIC"), Some(2));
        assert_eq!(catalog.position("Cherry"), None);
    }

    #[test]
    fn test_stop_word_only_record_has_zero_similarity() {
        let catalog = fixture_catalog();
        let blank = catalog.position("Blank Slate").unwrap();
        for j in 0..catalog.len() {
            let sim = catalog.similarity().get(blank, j).unwrap();
            assert_eq!(sim, 0.0);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = fixture_catalog();
        let second = fixture_catalog();
        assert_eq!(first.similarity(), second.similarity());
        assert_eq!(first.dramas(), second.dramas());
    }

    #[tokio::test]
    async fn test_cache_builds_once() {
        let cache = CatalogCache::new(Arc::new(mock_source(1)), Arc::new(EnglishStemmer));
        assert!(!cache.is_built().await);

        let first = tokio_test::assert_ok!(cache.get().await);
        let second = tokio_test::assert_ok!(cache.get().await);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_built().await);
    }

    #[tokio::test]
    async fn test_invalidate_triggers_rebuild() {
        let cache = CatalogCache::new(Arc::new(mock_source(2)), Arc::new(EnglishStemmer));

        let first = cache.get().await.unwrap();
        cache.invalidate().await;
        assert!(!cache.is_built().await);

        let second = cache.get().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.similarity(), second.similarity());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_catalog() {
        let mut source = MockDatasetSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|| Err(AppError::Dataset("unreachable".to_string())));
        source.expect_describe().returning(|| "mock".to_string());

        let cache = CatalogCache::prebuilt(
            fixture_catalog(),
            Arc::new(source),
            Arc::new(EnglishStemmer),
        );

        assert!(cache.reload().await.is_err());
        let catalog = cache.get().await.unwrap();
        assert_eq!(catalog.len(), 7);
    }

    #[tokio::test]
    async fn test_missing_column_fails_load() {
        let mut source = MockDatasetSource::new();
        source
            .expect_fetch()
            .returning(|| Ok("Title,Country\nA,Japan\n".to_string()));
        source.expect_describe().returning(|| "mock".to_string());

        let cache = CatalogCache::new(Arc::new(source), Arc::new(EnglishStemmer));
        assert!(matches!(cache.get().await, Err(AppError::MissingColumn(_))));
        assert!(!cache.is_built().await);
    }
}
