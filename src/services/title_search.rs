use crate::models::Drama;

/// Titles containing `query` case-insensitively, in catalog order
pub fn suggest_titles(dramas: &[Drama], query: &str, limit: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return vec![];
    }

    dramas
        .iter()
        .filter(|d| d.title.to_lowercase().contains(&query))
        .take(limit)
        .map(|d| d.title.clone())
        .collect()
}
