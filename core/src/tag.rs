use std::collections::BTreeMap;
use std::io::Write;
use std::num::NonZeroUsize;

use crate::error::Result;
use crate::index::{DocId, InvertedIndex, QueryPolicy};

/// Controls how [`tag_documents`] marks co-occurring windows.
#[derive(Debug, Clone)]
pub struct TagOptions {
    /// Words per window; each document's text is cut into consecutive,
    /// non-overlapping runs of this many words.
    pub window_size: NonZeroUsize,
    /// A full window is marked when its words co-occur in at least this
    /// many documents.
    pub min_occurrences: usize,
    pub open_marker: String,
    pub close_marker: String,
    /// Policy for window words absent from the index.
    pub policy: QueryPolicy,
}

/// Annotate each document's text against the index.
///
/// Full windows whose words share at least `min_occurrences` documents are
/// wrapped in the markers; everything else is emitted space-joined as-is.
/// A trailing window shorter than `window_size` is never marked. Output is
/// one newline-terminated line per document in ascending document order; a
/// document with no words yields an empty line.
pub fn tag_documents<W: Write>(
    index: &InvertedIndex,
    options: &TagOptions,
    documents: &BTreeMap<DocId, String>,
    out: &mut W,
) -> Result<()> {
    let window_size = options.window_size.get();
    let mut marked = 0usize;
    for text in documents.values() {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut pieces: Vec<String> = Vec::with_capacity(words.len() / window_size + 1);
        for window in words.chunks(window_size) {
            let joined = window.join(" ");
            if window.len() == window_size
                && index.query(window, options.policy)?.len() >= options.min_occurrences
            {
                pieces.push(format!(
                    "{}{joined}{}",
                    options.open_marker, options.close_marker
                ));
                marked += 1;
            } else {
                pieces.push(joined);
            }
        }
        writeln!(out, "{}", pieces.join(" "))?;
    }
    tracing::info!(documents = documents.len(), marked, "tagged documents");
    Ok(())
}
