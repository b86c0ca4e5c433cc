use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::{Error, Result};

pub type DocId = u32;

/// How [`InvertedIndex::query`] treats words absent from the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPolicy {
    /// Fail with [`Error::UnknownWord`] on the first absent word.
    Strict,
    /// Skip absent words and intersect only the known ones. A query whose
    /// words are all absent yields an empty result.
    Lenient,
}

/// Mapping from word to posting list. Posting lists hold the IDs of the
/// documents containing the word, in the order the documents were indexed,
/// with at most one entry per document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<DocId>>,
}

impl InvertedIndex {
    /// Wrap a prebuilt posting map. An index with zero words is invalid.
    pub fn new(postings: HashMap<String, Vec<DocId>>) -> Result<Self> {
        if postings.is_empty() {
            return Err(Error::EmptyIndex);
        }
        Ok(Self { postings })
    }

    /// Build the index from per-document unique word sets.
    ///
    /// Documents are visited in ascending ID order, so posting lists come
    /// out in that order and rebuilding the same collection always produces
    /// the same serialized file.
    pub fn from_documents(documents: &BTreeMap<DocId, BTreeSet<String>>) -> Result<Self> {
        if documents.is_empty() {
            return Err(Error::EmptyIndex);
        }
        let mut postings: HashMap<String, Vec<DocId>> = HashMap::new();
        for (&doc_id, words) in documents {
            for word in words {
                postings.entry(word.clone()).or_default().push(doc_id);
            }
        }
        let index = Self::new(postings)?;
        tracing::info!(
            documents = documents.len(),
            words = index.len(),
            "built inverted index"
        );
        Ok(index)
    }

    /// IDs of the documents containing every word in `words` (boolean AND),
    /// sorted ascending and free of duplicates.
    ///
    /// Every requested word's posting list takes part in the intersection;
    /// `policy` decides what happens to words the index has never seen.
    pub fn query<S: AsRef<str>>(&self, words: &[S], policy: QueryPolicy) -> Result<Vec<DocId>> {
        let mut lists: Vec<&[DocId]> = Vec::with_capacity(words.len());
        for word in words {
            match self.postings.get(word.as_ref()) {
                Some(postings) => lists.push(postings),
                None => match policy {
                    QueryPolicy::Strict => {
                        return Err(Error::UnknownWord(word.as_ref().to_string()))
                    }
                    QueryPolicy::Lenient => continue,
                },
            }
        }
        // Intersecting zero lists (empty query, or all words unknown under
        // the lenient policy) is defined as the empty result.
        if lists.is_empty() {
            return Ok(Vec::new());
        }
        let mut found: HashSet<DocId> = lists[0].iter().copied().collect();
        for list in &lists[1..] {
            let ids: HashSet<DocId> = list.iter().copied().collect();
            found.retain(|id| ids.contains(id));
        }
        let mut found: Vec<DocId> = found.into_iter().collect();
        found.sort_unstable();
        Ok(found)
    }

    /// Posting list for `word`, if indexed.
    pub fn postings(&self, word: &str) -> Option<&[DocId]> {
        self.postings.get(word).map(Vec::as_slice)
    }

    /// Number of distinct indexed words.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Iterate over `(word, posting list)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DocId])> {
        self.postings
            .iter()
            .map(|(word, postings)| (word.as_str(), postings.as_slice()))
    }
}
