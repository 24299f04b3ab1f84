// ============================================================
// Layer 4 — Loader Configuration
// ============================================================
// Everything a CorpusLoader needs to know, in one serialisable
// struct. The CLI fills it from flags (see cli/commands.rs);
// tests build it directly and override what they need.
//
// Data directory layout:
//   {data_dir}/sentences.txt   ← input corpus
//   {data_dir}/vocab.pkl       ← ordered token list
//   {data_dir}/data.npy        ← full encoded corpus (int64)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::encoding::TextEncoding;
use crate::domain::error::CorpusError;

pub const SOURCE_FILE: &str = "sentences.txt";
pub const VOCAB_FILE:  &str = "vocab.pkl";
pub const TENSOR_FILE: &str = "data.npy";

/// Characters seen this many times or fewer become UNK.
pub const DEFAULT_MIN_COUNT: usize = 10;

/// Share of the encoded corpus (by position) used for training.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.999;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub data_dir:       PathBuf,
    pub batch_size:     usize,
    pub seq_length:     usize,
    pub force_reload:   bool,
    pub encoding:       String,
    pub min_count:      usize,
    pub train_fraction: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir:       PathBuf::from("data"),
            batch_size:     30,
            seq_length:     25,
            force_reload:   false,
            encoding:       "utf-8".to_string(),
            min_count:      DEFAULT_MIN_COUNT,
            train_fraction: DEFAULT_TRAIN_FRACTION,
        }
    }
}

impl LoaderConfig {
    pub fn new(data_dir: impl Into<PathBuf>, batch_size: usize, seq_length: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            batch_size,
            seq_length,
            ..Self::default()
        }
    }

    pub fn with_force_reload(mut self, force_reload: bool) -> Self {
        self.force_reload = force_reload;
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }

    pub fn with_train_fraction(mut self, train_fraction: f64) -> Self {
        self.train_fraction = train_fraction;
        self
    }

    pub fn source_path(&self) -> PathBuf {
        self.data_dir.join(SOURCE_FILE)
    }

    pub fn vocab_path(&self) -> PathBuf {
        self.data_dir.join(VOCAB_FILE)
    }

    pub fn tensor_path(&self) -> PathBuf {
        self.data_dir.join(TENSOR_FILE)
    }

    /// Elements in one batch window, or `None` if the product
    /// does not fit in a usize.
    pub fn window_size(&self) -> Option<usize> {
        self.batch_size.checked_mul(self.seq_length)
    }

    /// Reject settings no corpus could satisfy, and resolve the
    /// encoding name.
    pub fn validate(&self) -> Result<TextEncoding, CorpusError> {
        if self.batch_size == 0 || self.seq_length == 0 {
            return Err(CorpusError::InvalidConfig(format!(
                "batch_size ({}) and seq_length ({}) must both be at least 1",
                self.batch_size, self.seq_length
            )));
        }
        if self.window_size().is_none() {
            return Err(CorpusError::InvalidConfig(format!(
                "batch_size ({}) x seq_length ({}) is too large",
                self.batch_size, self.seq_length
            )));
        }
        if !(self.train_fraction > 0.0 && self.train_fraction <= 1.0) {
            return Err(CorpusError::InvalidConfig(format!(
                "train_fraction must be in (0, 1], got {}",
                self.train_fraction
            )));
        }
        self.encoding.parse()
    }
}
