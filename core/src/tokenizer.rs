use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::index::DocId;

lazy_static! {
    static ref PUNCTUATION: Regex = Regex::new(r"[[:punct:]]+").expect("valid regex");
}

/// Words excluded from indexing; on disk, one lowercase word per line.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Load a stop-word file. Blank lines are skipped; the file must exist
    /// and contain at least one word.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path)?;
        let words: HashSet<String> = raw
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|line| !line.is_empty())
            .collect();
        if words.is_empty() {
            return Err(Error::EmptyFile {
                what: "stop-word",
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(stop_words = words.len(), "loaded stop words");
        Ok(Self { words })
    }

    /// Build a stop-word set from an in-memory word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Normalize raw text: NFKC, lowercase, punctuation removed.
pub fn clean(text: &str) -> String {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    PUNCTUATION.replace_all(&normalized, "").into_owned()
}

/// Tokenize text into its cleaned word stream: lowercased, punctuation
/// stripped, digit-containing tokens and stop words dropped. Order and
/// repeats are preserved; de-duplication happens per document in
/// [`unique_words`].
pub fn tokenize(text: &str, stop_words: &StopWords) -> Vec<String> {
    let cleaned = clean(text);
    cleaned
        .split_whitespace()
        .filter(|token| !token.bytes().any(|b| b.is_ascii_digit()))
        .filter(|token| !stop_words.contains(token))
        .map(str::to_string)
        .collect()
}

/// Per-document unique word sets, the input shape for index construction.
pub fn unique_words(
    documents: &BTreeMap<DocId, String>,
    stop_words: &StopWords,
) -> BTreeMap<DocId, BTreeSet<String>> {
    documents
        .iter()
        .map(|(&doc_id, text)| (doc_id, tokenize(text, stop_words).into_iter().collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_stop_words() -> StopWords {
        StopWords::default()
    }

    #[test]
    fn clean_lowercases_and_strips_punctuation() {
        assert_eq!(clean("Hello, World!"), "hello world");
        assert_eq!(clean("don't-stop"), "dontstop");
    }

    #[test]
    fn tokenize_preserves_order_and_repeats() {
        let tokens = tokenize("world world hello", &no_stop_words());
        assert_eq!(tokens, vec!["world", "world", "hello"]);
    }

    #[test]
    fn tokenize_drops_digit_bearing_tokens() {
        let tokens = tokenize("version v2 of 42 tools", &no_stop_words());
        assert_eq!(tokens, vec!["version", "of", "tools"]);
    }

    #[test]
    fn tokenize_drops_stop_words() {
        let stop_words = StopWords::from_words(["the", "and"]);
        let tokens = tokenize("The quick and the dead", &stop_words);
        assert_eq!(tokens, vec!["quick", "dead"]);
    }

    #[test]
    fn tokenize_strips_punctuation_before_filtering() {
        let stop_words = StopWords::from_words(["the"]);
        // "The," must still be recognized as the stop word "the".
        let tokens = tokenize("The, quick; fox.", &stop_words);
        assert_eq!(tokens, vec!["quick", "fox"]);
    }

    #[test]
    fn unique_words_deduplicates_per_document() {
        let mut documents = BTreeMap::new();
        documents.insert(1, "testing hello hello".to_string());
        documents.insert(2, "world world hello".to_string());
        let unique = unique_words(&documents, &no_stop_words());

        let doc1: Vec<&str> = unique[&1].iter().map(String::as_str).collect();
        let doc2: Vec<&str> = unique[&2].iter().map(String::as_str).collect();
        assert_eq!(doc1, vec!["hello", "testing"]);
        assert_eq!(doc2, vec!["hello", "world"]);
    }

    #[test]
    fn stop_word_lookup_is_exact() {
        let stop_words = StopWords::from_words(["he"]);
        assert!(stop_words.contains("he"));
        assert!(!stop_words.contains("hello"));
    }
}
