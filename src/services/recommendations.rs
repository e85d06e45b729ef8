use crate::{
    error::{AppError, AppResult},
    services::catalog::{ensure_consistent, Catalog},
};

/// Number of similar titles returned per query
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Titles most similar to `title`, best first.
///
/// An unknown title yields an empty list. Candidates are ordered by similarity
/// with a stable sort over catalog order, so equal scores keep the earlier
/// record first. The queried record itself is never part of the result.
pub fn recommend(catalog: &Catalog, title: &str) -> AppResult<Vec<String>> {
    ensure_consistent(catalog)?;

    let Some(index) = catalog.position(title) else {
        return Ok(vec![]);
    };

    let row = catalog.similarity().row(index)?;
    let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    if ranked.iter().any(|(_, score)| score.is_nan()) {
        return Err(AppError::Internal(format!(
            "similarity row for '{}' contains NaN",
            title
        )));
    }
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .into_iter()
        .filter(|(candidate, _)| *candidate != index)
        .take(MAX_RECOMMENDATIONS)
        .map(|(candidate, _)| {
            catalog
                .dramas()
                .get(candidate)
                .map(|d| d.title.clone())
                .ok_or_else(|| AppError::Internal(format!("no drama at index {}", candidate)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::tests::{fixture_catalog, FIXTURE};
    use crate::services::dataset::parse_dramas;
    use crate::services::text::EnglishStemmer;

    #[test]
    fn test_never_recommends_itself() {
        let catalog = fixture_catalog();
        for drama in catalog.dramas() {
            let recs = recommend(&catalog, &drama.title).unwrap();
            assert!(!recs.contains(&drama.title));
            assert!(recs.len() <= MAX_RECOMMENDATIONS);
            assert!(recs.len() <= catalog.len() - 1);
        }
    }

    #[test]
    fn test_unknown_title_is_empty() {
        let catalog = fixture_catalog();
        assert!(recommend(&catalog, "Not A Drama").unwrap().is_empty());
        assert!(recommend(&catalog, "NOT A DRAMA").unwrap().is_empty());
        assert!(recommend(&catalog, "").unwrap().is_empty());
    }

    #[test]
    fn test_lookup_ignores_case() {
        let catalog = fixture_catalog();
        assert_eq!(
            recommend(&catalog, "semantic error").unwrap(),
            recommend(&catalog, "Semantic Error").unwrap()
        );
    }

    #[test]
    fn test_results_sorted_by_similarity() {
        let catalog = fixture_catalog();
        let index = catalog.position("Semantic Error").unwrap();
        let recs = recommend(&catalog, "Semantic Error").unwrap();
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);

        let scores: Vec<f64> = recs
            .iter()
            .map(|t| {
                let j = catalog.position(t).unwrap();
                catalog.similarity().get(index, j).unwrap()
            })
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = fixture_catalog();
        // Nothing overlaps with the stop-word-only record, so every candidate ties at 0
        let recs = recommend(&catalog, "Blank Slate").unwrap();
        let expected: Vec<String> = catalog
            .dramas()
            .iter()
            .map(|d| d.title.clone())
            .filter(|t| t != "Blank Slate")
            .take(MAX_RECOMMENDATIONS)
            .collect();
        assert_eq!(recs, expected);
    }

    #[test]
    fn test_small_catalog_returns_fewer() {
        let dramas = parse_dramas(FIXTURE, &EnglishStemmer).unwrap();
        let catalog = Catalog::from_dramas(dramas.into_iter().take(3).collect());
        let recs = recommend(&catalog, "Light On Me").unwrap();
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let catalog = fixture_catalog();
        assert_eq!(
            recommend(&catalog, "Cherry Magic").unwrap(),
            recommend(&fixture_catalog(), "Cherry Magic").unwrap()
        );
    }
}
