// ============================================================
// char-corpus
// ============================================================
// Character-level corpus preprocessing for sequence models:
// text normalisation, a frequency-pruned vocabulary, persisted
// artifacts (vocab.pkl, data.npy) and [batch_size, seq_length]
// training windows, plus Burn tensor and checkpoint glue.
//
// Layers, outermost first:
//   cli         → argument parsing and printing
//   application → one use case per command
//   domain      → special tokens, vocabulary, errors, traits
//   data        → normaliser, loader, windows, batcher
//   infra       → artifact stores and checkpoints

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod infra;
