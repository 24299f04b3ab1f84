// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The loader is written against these traits rather than
// concrete file types, so a test can feed it an in-memory
// corpus and the artifact format can change without touching
// the preprocessing logic.
//
//   CorpusSource     → TextFileSource (sentences.txt)
//   ArtifactStore<T> → VocabStore (vocab.pkl)
//                      TensorStore (data.npy)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Anything that yields the raw corpus one line at a time.
pub trait CorpusSource {
    /// Read every line, without its line terminator, already
    /// decoded to UTF-8.
    fn read_lines(&self) -> Result<Vec<String>>;

    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;
}

// ─── ArtifactStore ────────────────────────────────────────────────────────────
/// A single persisted preprocessing artifact.
///
/// Implementations:
///   - VocabStore  → the ordered token list
///   - TensorStore → the encoded corpus
pub trait ArtifactStore<T> {
    /// Whether the artifact is present on disk.
    fn exists(&self) -> bool;

    /// Write the artifact, replacing any previous version.
    fn save(&self, value: &T) -> Result<()>;

    /// Read the artifact back. Fails if it is missing or corrupt.
    fn load(&self) -> Result<T>;
}
