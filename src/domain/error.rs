// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Failures the corpus pipeline reports to its caller.
// None of these are retried internally: the caller fixes the
// data or configuration and builds a new loader.
//
// I/O failures are not listed here; they travel as
// std::io::Error wrapped in anyhow context by the layer that
// touched the file.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    /// The Train split cannot fill even one batch window.
    #[error(
        "Not enough data: {available} training tokens cannot fill one \
         {batch_size}x{seq_length} batch. Make seq_length and batch_size smaller."
    )]
    InsufficientData {
        available:  usize,
        batch_size: usize,
        seq_length: usize,
    },

    /// A persisted artifact could not be decoded.
    #[error("Corrupt artifact '{}': {reason}", path.display())]
    CorruptArtifact { path: PathBuf, reason: String },

    /// A token list that cannot be a vocabulary.
    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    #[error("Unsupported text encoding '{0}' (expected utf-8, utf-8-sig or latin-1)")]
    UnsupportedEncoding(String),

    /// A source line is not valid in the configured encoding.
    #[error("Line {line} is not valid {encoding}")]
    InvalidEncoding { line: usize, encoding: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CorpusError {
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CorpusError::CorruptArtifact {
            path:   path.into(),
            reason: reason.into(),
        }
    }
}
