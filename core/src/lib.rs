//! Core library for textdex: build a word→document inverted index from a
//! tab-delimited dataset, answer boolean AND queries against it, persist it
//! as a flat JSON document, and mark co-occurring word windows in the text.

pub mod dataset;
pub mod error;
pub mod index;
pub mod persist;
pub mod tag;
pub mod tokenizer;

pub use error::{Error, Result};
pub use index::{DocId, InvertedIndex, QueryPolicy};
pub use tag::{tag_documents, TagOptions};
pub use tokenizer::StopWords;
