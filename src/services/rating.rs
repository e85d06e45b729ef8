use std::sync::LazyLock;

use regex::Regex;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("number pattern is valid"));

/// First integer or decimal number found in a free-text rating such as "7.5/10 (MDL)"
pub fn extract_numeric_rating(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace('\u{a0}', " ");
    NUMBER
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_rating() {
        assert_eq!(extract_numeric_rating("7.5/10 (MDL)"), Some(7.5));
    }

    #[test]
    fn test_no_number() {
        assert_eq!(extract_numeric_rating("N/A"), None);
        assert_eq!(extract_numeric_rating(""), None);
    }

    #[test]
    fn test_non_breaking_space_and_padding() {
        assert_eq!(extract_numeric_rating("  8\u{a0}/10"), Some(8.0));
    }

    #[test]
    fn test_first_number_wins() {
        assert_eq!(extract_numeric_rating("Rated 9 by 1200 users"), Some(9.0));
    }

    #[test]
    fn test_trailing_dot_is_not_decimal() {
        assert_eq!(extract_numeric_rating("8./10"), Some(8.0));
    }
}
