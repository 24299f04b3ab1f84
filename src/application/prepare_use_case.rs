// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Runs the corpus loader once and reports what it produced:
//
//   Step 1: Build the loader      (Layer 4 - data)
//             → preprocesses sentences.txt, or reuses
//               vocab.pkl + data.npy
//   Step 2: Summarise             vocabulary, split and batch
//                                 counts
//
// The summary is serialisable so the CLI can print it as JSON.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{
    config::LoaderConfig,
    loader::{CorpusLoader, Origin},
};
use crate::domain::special::SpecialToken;

/// How many of the most frequent characters to report.
const TOP_TOKENS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub data_dir:          String,
    pub preprocessed:      bool,
    pub vocab_size:        usize,
    pub tensor_len:        usize,
    pub train_tokens:      usize,
    pub valid_tokens:      usize,
    pub batch_size:        usize,
    pub seq_length:        usize,
    pub num_batches:       usize,
    pub num_valid_batches: usize,
    /// Most frequent corpus characters, most frequent first
    pub top_tokens:        Vec<String>,
}

impl CorpusSummary {
    pub fn from_loader(loader: &CorpusLoader) -> Self {
        let cfg = loader.config();
        Self {
            data_dir:          cfg.data_dir.display().to_string(),
            preprocessed:      loader.origin() == Origin::Preprocessed,
            vocab_size:        loader.vocab_size(),
            tensor_len:        loader.tensor_len(),
            train_tokens:      loader.train().len(),
            valid_tokens:      loader.valid().len(),
            batch_size:        cfg.batch_size,
            seq_length:        cfg.seq_length,
            num_batches:       loader.num_batches(),
            num_valid_batches: loader.num_valid_batches(),
            top_tokens: loader
                .vocab()
                .tokens()
                .iter()
                .skip(SpecialToken::ALL.len())
                .take(TOP_TOKENS)
                .cloned()
                .collect(),
        }
    }
}

pub struct PrepareUseCase {
    config: LoaderConfig,
}

impl PrepareUseCase {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<CorpusSummary> {
        tracing::info!("Preparing corpus in '{}'", self.config.data_dir.display());
        let loader = CorpusLoader::new(self.config.clone())?;
        Ok(CorpusSummary::from_loader(&loader))
    }
}
