// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Owns the whole preprocessing lifecycle for one data directory
// and then serves training batches in order.
//
// Construction runs once, in this order:
//
//   1. Decide            force_reload, or vocab.pkl / data.npy
//                        missing?  → Preprocess
//                        otherwise → LoadPreprocessed
//   2. Preprocess        sentences.txt → normalise each line →
//                        GO + chars + EOS → count → Vocabulary →
//                        encode → write vocab.pkl + data.npy
//   3. LoadPreprocessed  read vocab.pkl + data.npy back
//   4. Split             first train_fraction (99.9% by default)
//                        is train, the rest validation
//   5. CreateBatches     cut both splits into windows; a train
//                        split too small for one window is fatal
//   6. ResetCursor       batch pointer = 0
//
// The split is never persisted; it is recomputed from data.npy
// the same way every time.
//
// Corrupt artifacts are an error, not a reason to re-read the
// text file. Pass force_reload to rebuild them.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §17 (State patterns)

use anyhow::{Context, Result};
use burn::data::dataset::Dataset;
use ndarray::Array2;
use std::{fs, sync::Arc};

use crate::data::{
    config::LoaderConfig,
    dataset::WindowPair,
    normalizer::normalize_unicodes,
    source::TextFileSource,
    splitter::split_train_val,
    windows::BatchWindows,
};
use crate::domain::{
    error::CorpusError,
    special::SpecialToken,
    traits::{ArtifactStore, CorpusSource},
    vocabulary::{FrequencyCounter, Vocabulary},
};
use crate::infra::{tensor_store::TensorStore, vocab_store::VocabStore};

/// Where the loader's vocabulary and tensor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Built from the text file during construction.
    Preprocessed,
    /// Read back from vocab.pkl and data.npy.
    LoadedFromArtifacts,
}

pub struct CorpusLoader {
    config:        LoaderConfig,
    origin:        Origin,
    vocab:         Vocabulary,
    tensor_len:    usize,
    train:         Vec<i64>,
    valid:         Vec<i64>,
    train_windows: BatchWindows,
    valid_windows: BatchWindows,
    pointer:       usize,
}

impl CorpusLoader {
    /// Build a loader reading `{data_dir}/sentences.txt`.
    pub fn new(config: LoaderConfig) -> Result<Self> {
        let encoding = config.validate()?;
        let source   = TextFileSource::new(config.source_path(), encoding);
        Self::with_source(config, &source)
    }

    /// Build a loader reading the corpus from any source. Artifacts
    /// still live in `config.data_dir`.
    pub fn with_source(config: LoaderConfig, source: &dyn CorpusSource) -> Result<Self> {
        config.validate()?;

        let vocab_store  = VocabStore::new(config.vocab_path());
        let tensor_store = TensorStore::new(config.tensor_path());

        // ── Step 1: Decide ────────────────────────────────────────────────────
        let rebuild = config.force_reload || !(vocab_store.exists() && tensor_store.exists());

        let (origin, vocab, tensor) = if rebuild {
            // ── Step 2: Preprocess ────────────────────────────────────────────
            tracing::info!("Reading text file {}", source.describe());
            let (vocab, tensor) = preprocess(source, config.min_count)?;

            fs::create_dir_all(&config.data_dir).with_context(|| {
                format!("Cannot create data directory '{}'", config.data_dir.display())
            })?;
            // vocab.pkl goes last: until it is written again, a
            // failed run leaves no pair for the next run to reuse.
            vocab_store.remove()?;
            tensor_store.save(&tensor)?;
            vocab_store.save(&vocab)?;

            tracing::info!(
                "Preprocess data done: {} tokens, vocabulary of {}",
                tensor.len(),
                vocab.len()
            );
            (Origin::Preprocessed, vocab, tensor)
        } else {
            // ── Step 3: LoadPreprocessed ──────────────────────────────────────
            tracing::info!("Loading preprocessed files from '{}'", config.data_dir.display());
            let vocab  = vocab_store.load()?;
            let tensor = tensor_store.load()?;

            if let Some(bad) = tensor.iter().find(|&&id| !vocab.contains_id(id)) {
                return Err(CorpusError::corrupt(
                    config.tensor_path(),
                    format!("token id {bad} outside vocabulary of {}", vocab.len()),
                )
                .into());
            }

            tracing::info!("Load data done: {} tokens", tensor.len());
            (Origin::LoadedFromArtifacts, vocab, tensor)
        };

        // ── Step 4: Split ─────────────────────────────────────────────────────
        let tensor_len     = tensor.len();
        let (train, valid) = split_train_val(tensor, config.train_fraction);

        let mut loader = Self {
            config,
            origin,
            vocab,
            tensor_len,
            train,
            valid,
            train_windows: BatchWindows::default(),
            valid_windows: BatchWindows::default(),
            pointer: 0,
        };

        // ── Steps 5 and 6 ─────────────────────────────────────────────────────
        loader.create_batches()?;
        loader.reset_batch_pointer();
        Ok(loader)
    }

    fn create_batches(&mut self) -> Result<()> {
        let (bs, sl) = (self.config.batch_size, self.config.seq_length);

        let fits = matches!(self.config.window_size(), Some(w) if self.train.len() >= w);
        if !fits {
            return Err(CorpusError::InsufficientData {
                available:  self.train.len(),
                batch_size: bs,
                seq_length: sl,
            }
            .into());
        }

        self.train_windows = BatchWindows::build(&self.train, bs, sl)?;
        self.valid_windows = BatchWindows::build(&self.valid, bs, sl)?;

        self.train.truncate(self.train_windows.element_count());
        self.valid.truncate(self.valid_windows.element_count());

        tracing::info!("Training data size {}", self.train.len());
        tracing::info!("Validation data size {}", self.valid.len());
        Ok(())
    }

    /// The batch at the cursor, then advance the cursor.
    ///
    /// `x` is a fresh copy the caller may mutate; `y` is shared
    /// with the loader. Returns `None` once every batch has been
    /// served. The cursor does not wrap; call
    /// [`reset_batch_pointer`](Self::reset_batch_pointer) to start
    /// a new epoch.
    pub fn next_batch(&mut self) -> Option<(Array2<i64>, Arc<Array2<i64>>)> {
        let batch = self.train_windows.pair(self.pointer)?;
        self.pointer += 1;
        Some(batch)
    }

    pub fn reset_batch_pointer(&mut self) {
        self.pointer = 0;
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn num_batches(&self) -> usize {
        self.train_windows.len()
    }

    pub fn num_valid_batches(&self) -> usize {
        self.valid_windows.len()
    }

    /// Validation window `index`. Validation is not cursor driven,
    /// so any window can be fetched at any time.
    pub fn valid_batch(&self, index: usize) -> Option<WindowPair> {
        self.valid_windows.get(index)
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Truncated train split.
    pub fn train(&self) -> &[i64] {
        &self.train
    }

    /// Truncated validation split.
    pub fn valid(&self) -> &[i64] {
        &self.valid
    }

    /// Length of the full encoded corpus before splitting.
    pub fn tensor_len(&self) -> usize {
        self.tensor_len
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

/// Read, normalise, count and encode a whole corpus.
pub fn preprocess(source: &dyn CorpusSource, min_count: usize) -> Result<(Vocabulary, Vec<i64>)> {
    let lines = source.read_lines()?;

    let mut stream  = Vec::new();
    let mut counter = FrequencyCounter::new();
    for line in &lines {
        let tokens = wrap_line(line);
        counter.update(&tokens);
        stream.extend(tokens);
    }

    tracing::debug!(
        "{} lines, {} tokens, {} distinct",
        lines.len(),
        stream.len(),
        counter.distinct()
    );

    let vocab  = Vocabulary::from_counts(&counter, min_count);
    let tensor = vocab.encode(&stream);
    Ok((vocab, tensor))
}

/// Token stream for one source line: GO, each character of the
/// normalised line (trailing whitespace removed), EOS.
pub fn wrap_line(line: &str) -> Vec<String> {
    let normalized = normalize_unicodes(line.trim_end());

    let mut tokens = Vec::with_capacity(normalized.len() + 2);
    tokens.push(SpecialToken::Go.as_str().to_string());
    tokens.extend(normalized.chars().map(String::from));
    tokens.push(SpecialToken::Eos.as_str().to_string());
    tokens
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::special::UNK_ID;
    use ndarray::array;
    use std::path::Path;

    struct MemorySource(Vec<String>);

    impl CorpusSource for MemorySource {
        fn read_lines(&self) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    /// 20 lines of "abc" → 100 tokens: [1,6,7,8,2] repeated.
    fn write_corpus(dir: &Path) {
        let text = "abc\n".repeat(20);
        fs::write(dir.join("sentences.txt"), text).unwrap();
    }

    fn corpus_error(err: &anyhow::Error) -> &CorpusError {
        err.downcast_ref::<CorpusError>().expect("a CorpusError")
    }

    #[test]
    fn test_wrap_line() {
        assert_eq!(wrap_line("（Ａ） \t"), vec!["_GO", "(", "A", ")", "_EOS"]);
        assert_eq!(wrap_line("  x"), vec!["_GO", " ", " ", "x", "_EOS"]);
        assert_eq!(wrap_line(""), vec!["_GO", "_EOS"]);
    }

    #[test]
    fn test_preprocess_builds_everything() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let loader = CorpusLoader::new(LoaderConfig::new(dir.path(), 2, 5)).unwrap();

        assert_eq!(loader.origin(), Origin::Preprocessed);
        assert!(dir.path().join("vocab.pkl").exists());
        assert!(dir.path().join("data.npy").exists());

        assert_eq!(
            loader.vocab().tokens(),
            &["_PAD", "_GO", "_EOS", "_UNK", " ", "\n", "a", "b", "c"]
        );
        assert_eq!(loader.tensor_len(), 100);

        // 99 train tokens / 10 per window = 9 windows, 90 tokens kept
        assert_eq!(loader.num_batches(), 9);
        assert_eq!(loader.train().len(), 90);
        // one validation token cannot fill a window, which is fine
        assert_eq!(loader.num_valid_batches(), 0);
        assert!(loader.valid().is_empty());
    }

    #[test]
    fn test_first_batch_contents() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let mut loader = CorpusLoader::new(LoaderConfig::new(dir.path(), 2, 5)).unwrap();
        let (x, y)     = loader.next_batch().unwrap();

        assert_eq!(x, array![[1i64, 6, 7, 8, 2], [1, 6, 7, 8, 2]]);
        assert_eq!(*y, array![[6i64, 7, 8, 2, 1], [6, 7, 8, 2, 1]]);
        assert_eq!(loader.pointer(), 1);
    }

    #[test]
    fn test_reuses_artifacts_without_source() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let mut first = CorpusLoader::new(LoaderConfig::new(dir.path(), 2, 5)).unwrap();
        fs::remove_file(dir.path().join("sentences.txt")).unwrap();

        let mut second = CorpusLoader::new(LoaderConfig::new(dir.path(), 2, 5)).unwrap();
        assert_eq!(second.origin(), Origin::LoadedFromArtifacts);
        assert_eq!(first.vocab(), second.vocab());
        assert_eq!(first.vocab().get("c"), second.vocab().get("c"));
        assert_eq!(first.train(), second.train());
        assert_eq!(first.next_batch().unwrap().0, second.next_batch().unwrap().0);
    }

    #[test]
    fn test_force_reload_reads_source_again() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());
        CorpusLoader::new(LoaderConfig::new(dir.path(), 2, 5)).unwrap();
        fs::remove_file(dir.path().join("sentences.txt")).unwrap();

        let cfg = LoaderConfig::new(dir.path(), 2, 5).with_force_reload(true);
        let err = CorpusLoader::new(cfg).err().expect("source is gone");
        let io  = err.downcast_ref::<std::io::Error>().expect("io error");
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_failed_rebuild_leaves_no_reusable_pair() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());
        CorpusLoader::new(LoaderConfig::new(dir.path(), 2, 5)).unwrap();

        // make the tensor write fail halfway through a rebuild
        fs::remove_file(dir.path().join("data.npy")).unwrap();
        fs::create_dir(dir.path().join("data.npy")).unwrap();

        let cfg = LoaderConfig::new(dir.path(), 2, 5).with_force_reload(true);
        assert!(CorpusLoader::new(cfg).is_err());
        assert!(!dir.path().join("vocab.pkl").exists());
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CorpusLoader::new(LoaderConfig::new(dir.path(), 2, 5)).is_err());
    }

    #[test]
    fn test_insufficient_train_data() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let err = CorpusLoader::new(LoaderConfig::new(dir.path(), 10, 20))
            .err()
            .expect("100 tokens cannot fill a 10x20 window");
        assert!(matches!(
            corpus_error(&err),
            CorpusError::InsufficientData { available: 99, batch_size: 10, seq_length: 20 }
        ));
    }

    #[test]
    fn test_oversized_window_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let err = CorpusLoader::new(LoaderConfig::new(dir.path(), usize::MAX / 2 + 1, 2))
            .err()
            .expect("window does not fit in usize");
        assert!(matches!(corpus_error(&err), CorpusError::InvalidConfig(_)));
    }

    #[test]
    fn test_validation_batches_with_custom_fraction() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let cfg    = LoaderConfig::new(dir.path(), 2, 5).with_train_fraction(0.5);
        let loader = CorpusLoader::new(cfg).unwrap();
        assert_eq!(loader.num_batches(), 5);
        assert_eq!(loader.num_valid_batches(), 5);

        let pair = loader.valid_batch(4).unwrap();
        assert_eq!(pair.x.dim(), (2, 5));
        // the last validation target wraps to the first validation token
        assert_eq!(pair.y[[1, 4]], loader.valid()[0]);
        assert!(loader.valid_batch(5).is_none());
    }

    #[test]
    fn test_epoch_reset_reproduces_first_batch() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let mut loader = CorpusLoader::new(LoaderConfig::new(dir.path(), 2, 5)).unwrap();
        let first      = loader.next_batch().unwrap();
        for _ in 1..loader.num_batches() {
            assert!(loader.next_batch().is_some());
        }
        assert!(loader.next_batch().is_none());
        assert_eq!(loader.pointer(), loader.num_batches());

        loader.reset_batch_pointer();
        let again = loader.next_batch().unwrap();
        assert_eq!(first.0, again.0);
        assert_eq!(first.1, again.1);
    }

    #[test]
    fn test_caller_mutation_does_not_leak() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let mut loader = CorpusLoader::new(LoaderConfig::new(dir.path(), 2, 5)).unwrap();
        let (mut x, _) = loader.next_batch().unwrap();
        x.fill(0);

        loader.reset_batch_pointer();
        let (x, _) = loader.next_batch().unwrap();
        assert_eq!(x[[0, 0]], 1);
    }

    #[test]
    fn test_rare_characters_become_unk() {
        let dir    = tempfile::tempdir().unwrap();
        let source = MemorySource(vec!["xyz".to_string(); 5]);

        let loader = CorpusLoader::with_source(LoaderConfig::new(dir.path(), 1, 5), &source).unwrap();
        assert_eq!(loader.vocab_size(), 6);
        assert!(loader.train().contains(&UNK_ID));
        assert!(loader.train().iter().all(|&id| id <= UNK_ID));
    }

    #[test]
    fn test_min_count_override() {
        let dir    = tempfile::tempdir().unwrap();
        let source = MemorySource(vec!["xyz".to_string(); 5]);

        let cfg    = LoaderConfig::new(dir.path(), 1, 5).with_min_count(4);
        let loader = CorpusLoader::with_source(cfg, &source).unwrap();
        assert_eq!(loader.vocab_size(), 9);
        assert!(!loader.train().contains(&UNK_ID));
    }

    #[test]
    fn test_corrupt_vocab_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());
        CorpusLoader::new(LoaderConfig::new(dir.path(), 2, 5)).unwrap();
        fs::write(dir.path().join("vocab.pkl"), b"not a vocabulary").unwrap();

        let err = CorpusLoader::new(LoaderConfig::new(dir.path(), 2, 5))
            .err()
            .expect("corrupt vocab.pkl");
        assert!(matches!(corpus_error(&err), CorpusError::CorruptArtifact { .. }));
    }

    #[test]
    fn test_out_of_range_ids_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());
        CorpusLoader::new(LoaderConfig::new(dir.path(), 2, 5)).unwrap();
        TensorStore::new(dir.path().join("data.npy")).save(&vec![1, 6, 42]).unwrap();

        let err = CorpusLoader::new(LoaderConfig::new(dir.path(), 1, 1))
            .err()
            .expect("id 42 is not in a 9-token vocabulary");
        assert!(matches!(corpus_error(&err), CorpusError::CorruptArtifact { .. }));
    }
}
