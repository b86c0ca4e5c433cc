use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed index file: {0}")]
    IndexFormat(#[from] serde_json::Error),

    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("{what} file is empty: {}", .path.display())]
    EmptyFile { what: &'static str, path: PathBuf },

    #[error("{}:{line}: line does not start with a numeric document id", .path.display())]
    MalformedLine { path: PathBuf, line: usize },

    #[error("word '{0}' does not exist in the index")]
    UnknownWord(String),

    #[error("the index contains no words")]
    EmptyIndex,
}
