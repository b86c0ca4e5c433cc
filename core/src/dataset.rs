use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::index::DocId;

/// Load a tab-delimited dataset: one `<id>\t<text>` document per line.
///
/// The first field must be a decimal document ID; anything else is a
/// [`Error::MalformedLine`]. A line with an ID but no tab is a document
/// with empty text. When an ID repeats, the later line wins.
pub fn load<P: AsRef<Path>>(path: P) -> Result<BTreeMap<DocId, String>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    let mut documents = BTreeMap::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let (id_field, text) = match line.split_once('\t') {
            Some((id_field, text)) => (id_field, text),
            None => (line, ""),
        };
        if id_field.is_empty() || !id_field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedLine {
                path: path.to_path_buf(),
                line: number + 1,
            });
        }
        let doc_id: DocId = id_field.parse().map_err(|_| Error::MalformedLine {
            path: path.to_path_buf(),
            line: number + 1,
        })?;
        documents.insert(doc_id, text.trim().to_string());
    }
    if documents.is_empty() {
        return Err(Error::EmptyFile {
            what: "dataset",
            path: path.to_path_buf(),
        });
    }
    tracing::info!(documents = documents.len(), path = %path.display(), "loaded dataset");
    Ok(documents)
}
