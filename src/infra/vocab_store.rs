// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Persists the ordered token list to {data_dir}/vocab.pkl.
//
// Format: bincode encoding of Vec<String>. The file is private
// to this pipeline; only VocabStore reads it back.
//
// Loading re-validates the list (reserved prefix, no
// duplicates) so a file from some other tool is reported as
// corrupt instead of silently shifting every ID.
//
// Reference: bincode crate documentation

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::error::CorpusError;
use crate::domain::traits::ArtifactStore;
use crate::domain::vocabulary::Vocabulary;
use crate::infra::write_atomic;

pub struct VocabStore {
    path: PathBuf,
}

impl VocabStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete vocab.pkl if present.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Cannot remove '{}'", self.path.display())),
        }
    }
}

impl ArtifactStore<Vocabulary> for VocabStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn save(&self, vocab: &Vocabulary) -> Result<()> {
        let bytes = bincode::serialize(vocab.tokens())
            .with_context(|| "Cannot serialise vocabulary")?;
        write_atomic(&self.path, &bytes)
            .with_context(|| format!("Cannot write vocabulary to '{}'", self.path.display()))?;

        tracing::debug!("Saved {} tokens to '{}'", vocab.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Vocabulary> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Cannot read vocabulary from '{}'", self.path.display()))?;

        let tokens: Vec<String> = bincode::deserialize(&bytes)
            .map_err(|e| CorpusError::corrupt(&self.path, e.to_string()))?;

        let vocab = Vocabulary::from_tokens(tokens)
            .map_err(|e| CorpusError::corrupt(&self.path, e.to_string()))?;

        tracing::debug!("Loaded {} tokens from '{}'", vocab.len(), self.path.display());
        Ok(vocab)
    }
}
