use std::collections::HashSet;

use crate::models::Drama;

/// Best rated dramas whose country field mentions `country`.
///
/// Matching is a case-insensitive substring test so multi-country entries
/// like "South Korea, Japan" match either name. Unrated dramas are skipped;
/// equal ratings keep catalog order.
pub fn top_dramas(dramas: &[Drama], country: &str, n: usize) -> Vec<Drama> {
    let mut seen = HashSet::new();
    let mut matches: Vec<&Drama> = dramas
        .iter()
        .filter(|d| d.has_country(country))
        .filter(|d| d.numeric_rating.is_some())
        .filter(|d| seen.insert(d.title.as_str()))
        .collect();

    matches.sort_by(|a, b| {
        let a = a.numeric_rating.unwrap_or(f64::NEG_INFINITY);
        let b = b.numeric_rating.unwrap_or(f64::NEG_INFINITY);
        b.total_cmp(&a)
    });

    matches.into_iter().take(n).cloned().collect()
}

/// `top_dramas` for each country, in the given order
pub fn showcase(dramas: &[Drama], countries: &[String], n: usize) -> Vec<(String, Vec<Drama>)> {
    countries
        .iter()
        .map(|country| (country.clone(), top_dramas(dramas, country, n)))
        .collect()
}
