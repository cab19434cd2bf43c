//! Naive keyword extraction used to build image-search queries.
//!
//! A word is any run of at least four ASCII letters standing alone, i.e. not
//! touching another letter, digit or underscore. Combining marks count as
//! separators, so `cafe\u{301}teria` yields `cafe` and `teria`. Words on the
//! stop list are dropped and the first three survivors, in order of
//! appearance, make up the query.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximal runs of ASCII letters; length and boundaries are checked separately.
static LETTER_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z]+").unwrap());

/// Characters that glue onto a letter run and stop it from being a whole word.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whole-word runs of four or more ASCII letters in `text`.
fn candidate_words(text: &str) -> impl Iterator<Item = &str> {
    LETTER_RUN_REGEX.find_iter(text).filter_map(move |m| {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        let standalone = !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char);
        (standalone && m.len() >= 4).then(|| m.as_str())
    })
}

/// Words never used as keywords.
///
/// Most entries are shorter than four letters and can never be keywords;
/// they stay so the list reads as the full set of function words.
pub const STOP_WORDS: &[&str] = &[
    "o", "a", "de", "do", "da", "em", "para", "com", "um", "uma", "os", "as", "no", "na", "é",
    "que", "e", "ou",
];

/// Default number of keywords kept per text block.
pub const DEFAULT_KEYWORD_LIMIT: usize = 3;

/// Query used when a text block yields no keyword.
pub const FALLBACK_QUERY: &str = "education";

/// Regex + stop-list keyword extractor.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stop_words: HashSet<String>,
    limit: usize,
    fallback: String,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            limit: DEFAULT_KEYWORD_LIMIT,
            fallback: FALLBACK_QUERY.to_string(),
        }
    }
}

impl KeywordExtractor {
    /// Create an extractor with the built-in stop list, limit and fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many keywords are kept.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Add extra words to the stop list.
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Set the query returned when no keyword survives.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Extract up to `limit` lowercase keywords from `text`.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        candidate_words(&lowered)
            .filter(|word| !self.stop_words.contains(*word))
            .take(self.limit)
            .map(str::to_string)
            .collect()
    }

    /// Build the image-search query for `text`.
    pub fn query(&self, text: &str) -> String {
        let keywords = self.extract(text);
        if keywords.is_empty() {
            self.fallback.clone()
        } else {
            keywords.join(" ")
        }
    }
}

/// Extract keywords with the default extractor.
pub fn extract_keywords(text: &str) -> Vec<String> {
    KeywordExtractor::default().extract(text)
}

/// Build an image-search query with the default extractor.
pub fn image_query(text: &str) -> String {
    KeywordExtractor::default().query(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_three_words() {
        assert_eq!(
            extract_keywords("Recycling helps protect forests and rivers"),
            vec!["recycling", "helps", "protect"]
        );
    }

    #[test]
    fn test_short_words_ignored() {
        assert_eq!(extract_keywords("The cat sat on a mat"), Vec::<String>::new());
        assert_eq!(extract_keywords("a big tree"), vec!["tree"]);
    }

    #[test]
    fn test_lowercases() {
        assert_eq!(extract_keywords("OCEAN Waves"), vec!["ocean", "waves"]);
    }

    #[test]
    fn test_stop_word_filtered() {
        assert_eq!(
            extract_keywords("Vamos para casa agora"),
            vec!["vamos", "casa", "agora"]
        );
    }

    #[test]
    fn test_digits_and_accents_break_words() {
        // "ação" has no run of four ASCII letters; "abc123" is not a whole word
        assert_eq!(extract_keywords("ação abc123 planeta"), vec!["planeta"]);
    }

    #[test]
    fn test_combining_marks_separate_words() {
        assert_eq!(
            extract_keywords("cafe\u{301}teria visit"),
            vec!["cafe", "teria", "visit"]
        );
        // "İ" lowercases to "i" plus a combining dot
        assert_eq!(extract_keywords("İstanbul city"), vec!["stanbul", "city"]);
    }

    #[test]
    fn test_letters_and_underscores_join_words() {
        assert_eq!(extract_keywords("évolution snake_case word"), vec!["word"]);
        assert_eq!(extract_keywords("(planet) \"moon\""), vec!["planet", "moon"]);
    }

    #[test]
    fn test_duplicates_kept() {
        assert_eq!(
            extract_keywords("water water water earth"),
            vec!["water", "water", "water"]
        );
    }

    #[test]
    fn test_query_joins_keywords() {
        assert_eq!(image_query("Climate change matters a lot"), "climate change matters");
    }

    #[test]
    fn test_query_fallback() {
        assert_eq!(image_query(""), "education");
        assert_eq!(image_query("O que é?"), "education");
    }

    #[test]
    fn test_custom_extractor() {
        let extractor = KeywordExtractor::new()
            .with_limit(2)
            .with_stop_words(["Introduction"])
            .with_fallback("school");

        assert_eq!(
            extractor.extract("Introduction: the environment matters today"),
            vec!["environment", "matters"]
        );
        assert_eq!(extractor.query("ok"), "school");
    }

    #[test]
    fn test_results_satisfy_shape() {
        let text = "Photosynthesis converts light energy into chemical energy, para todos.";
        let words = extract_keywords(text);
        assert!(words.len() <= DEFAULT_KEYWORD_LIMIT);
        for word in words {
            assert!(word.len() >= 4);
            assert!(word.chars().all(|c| c.is_ascii_lowercase()));
            assert!(!STOP_WORDS.contains(&word.as_str()));
        }
    }
}
