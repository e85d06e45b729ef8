//! Tag derivation and normalization.
//!
//! Every drama gets a `tags` blob built from its summary, genres and themes.
//! The blob is split on whitespace and each token is reduced to its stem, so
//! that surface variants ("loves", "loving") land on the same vocabulary term.

use std::sync::LazyLock;

use rust_stemmers::{Algorithm, Stemmer};

static ENGLISH: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

/// Reduces a single token to its stem.
///
/// The similarity index only relies on the mapping being deterministic, so any
/// suffix-stripping algorithm can sit behind this trait.
pub trait TokenStemmer: Send + Sync {
    fn stem(&self, token: &str) -> String;
}

/// English Snowball (Porter2) stemmer
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishStemmer;

impl TokenStemmer for EnglishStemmer {
    fn stem(&self, token: &str) -> String {
        ENGLISH.stem(token).into_owned()
    }
}

/// Lowercased "{summary} {genres} {themes}" with hyphens in themes turned into spaces
pub fn derive_tags(summary: &str, genres: &str, themes: &str) -> String {
    format!("{} {} {}", summary, genres, themes.replace('-', " ")).to_lowercase()
}

/// Stems every whitespace separated token and joins them with single spaces
pub fn normalize_tags(tags: &str, stemmer: &dyn TokenStemmer) -> String {
    tags.split_whitespace()
        .map(|token| stemmer.stem(token))
        .collect::<Vec<_>>()
        .join(" ")
}
