//! Index serialization.
//!
//! The on-disk index is a flat JSON object mapping each word to its posting
//! list encoded as semicolon-joined decimal IDs with a trailing separator,
//! e.g. `{"test": "1;3;"}`. Key order is unspecified; posting order is the
//! order the documents were indexed. Writes go through a temp file and a
//! rename so a failed dump never looks like a complete index.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::index::{DocId, InvertedIndex};

/// The serialized form: word → `"1;3;"`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingsFile(pub HashMap<String, String>);

/// Encode one posting list: `[1, 3]` → `"1;3;"`.
fn encode_postings(postings: &[DocId]) -> String {
    postings.iter().map(|id| format!("{id};")).collect()
}

/// Decode a `"1;3;"` string. Empty fragments are discarded; fragments that
/// are not purely decimal (or overflow [`DocId`]) are skipped with a warning.
fn decode_postings(word: &str, encoded: &str) -> Vec<DocId> {
    let mut postings = Vec::new();
    for fragment in encoded.trim().split(';') {
        if fragment.is_empty() {
            continue;
        }
        match fragment.parse::<DocId>() {
            Ok(id) if fragment.bytes().all(|b| b.is_ascii_digit()) => postings.push(id),
            _ => {
                tracing::warn!(word = %word, fragment = %fragment, "ignoring non-numeric posting fragment")
            }
        }
    }
    postings
}

/// Write `contents` to `path` atomically: write a sibling temp file, then
/// rename it into place.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Serialize the index to `path` as pretty-printed JSON.
pub fn dump<P: AsRef<Path>>(index: &InvertedIndex, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut encoded = HashMap::with_capacity(index.len());
    for (word, postings) in index.iter() {
        encoded.insert(word.to_string(), encode_postings(postings));
    }
    let json = serde_json::to_string_pretty(&PostingsFile(encoded))?;
    write_atomic(path, json.as_bytes())?;
    tracing::info!(words = index.len(), path = %path.display(), "dumped index");
    Ok(())
}

/// Load an index previously written by [`dump`].
///
/// Words whose value decodes to zero IDs are dropped with a warning; an
/// index that decodes to zero words is [`Error::EmptyIndex`].
pub fn load<P: AsRef<Path>>(path: P) -> Result<InvertedIndex> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path)?;
    let file: PostingsFile = serde_json::from_str(&raw)?;
    let mut postings = HashMap::with_capacity(file.0.len());
    for (word, encoded) in file.0 {
        let ids = decode_postings(&word, &encoded);
        if ids.is_empty() {
            tracing::warn!(word = %word, "dropping word with no decodable postings");
            continue;
        }
        postings.insert(word, ids);
    }
    let index = InvertedIndex::new(postings)?;
    tracing::info!(words = index.len(), path = %path.display(), "loaded index");
    Ok(index)
}
