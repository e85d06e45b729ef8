//! Bag-of-words term-frequency vectors.

use std::collections::HashMap;
use std::sync::LazyLock;

use ndarray::Array2;
use regex::Regex;

/// Tokens of two or more word characters
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// English stop words, dropped before counting
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot",
    "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do", "done",
    "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else", "elsewhere",
    "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything", "everywhere",
    "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five", "for", "former",
    "formerly", "forty", "found", "four", "from", "front", "full", "further", "get", "give", "go",
    "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie",
    "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
    "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
    "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must", "my",
    "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine", "no", "nobody",
    "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once",
    "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out",
    "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see",
    "seem", "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third",
    "this", "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

pub fn is_stop_word(token: &str) -> bool {
    ENGLISH_STOP_WORDS.binary_search(&token).is_ok()
}

/// Lowercased tokens of a document with stop words removed
pub fn tokenize(document: &str) -> Vec<String> {
    let lowered = document.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Count vectorizer with a frequency-capped vocabulary.
///
/// The vocabulary keeps the `max_features` terms with the highest total count
/// across the corpus; equal counts are ordered by term so the result does not
/// depend on hash iteration order.
#[derive(Debug, Clone, Default)]
pub struct CountVectorizer {
    max_features: Option<usize>,
    vocabulary: HashMap<String, usize>,
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// Learns the vocabulary and returns the `documents × vocabulary` count matrix
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Array2<f64> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            for token in tokens {
                *term_freq.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let mut sorted_terms: Vec<(&str, usize)> = term_freq.into_iter().collect();
        sorted_terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        if let Some(max_features) = self.max_features {
            sorted_terms.truncate(max_features);
        }

        // Columns follow alphabetical term order
        let mut terms: Vec<&str> = sorted_terms.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();
        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();

        let mut matrix = Array2::<f64>::zeros((documents.len(), self.vocabulary.len()));
        for (row, tokens) in tokenized.iter().enumerate() {
            for token in tokens {
                if let Some(&col) = self.vocabulary.get(token) {
                    matrix[[row, col]] += 1.0;
                }
            }
        }

        matrix
    }
}
