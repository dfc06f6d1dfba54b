//! Engine error type.
//!
//! Only corpus-level failures are errors: a missing or unreadable corpus root
//! aborts the run with no partial output. Per-document problems (malformed
//! JSON, unparseable currency, unmatched payload shapes) are logged and the
//! document contributes nothing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Corpus path not found: {0}")]
    CorpusNotFound(String),

    #[error("Corpus path is not a directory: {0}")]
    CorpusNotADirectory(String),

    #[error("Could not read {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid firm profile {path}: {source}")]
    Config {
        path: String,
        source: serde_json::Error,
    },
}
