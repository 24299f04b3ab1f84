// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw text file to training windows.
//
// The pipeline flows in this order:
//
//   sentences.txt
//       │
//       ▼
//   TextFileSource   → reads and decodes lines
//       │
//       ▼
//   normalizer       → punctuation table + full-width folding
//       │
//       ▼
//   CorpusLoader     → GO/EOS wrapping, counting, Vocabulary,
//       │              encoding, persisted artifacts
//       ▼
//   splitter         → contiguous train / validation split
//       │
//       ▼
//   BatchWindows     → [batch_size, seq_length] x/y windows
//       │
//       ▼
//   WindowBatcher    → Burn Int tensors for a training step
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §4 (Datasets)

/// Loader settings and artifact file names
pub mod config;

/// Text decodings supported for the corpus file
pub mod encoding;

/// Reads the corpus file line by line
pub mod source;

/// Punctuation canonicalisation and full-width folding
pub mod normalizer;

/// Contiguous train/validation split
pub mod splitter;

/// Next-token prediction windows over one split
pub mod windows;

/// Burn Dataset view over the windows
pub mod dataset;

/// Converts windows into Burn tensors
pub mod batcher;

/// The preprocessing state machine and batch cursor
pub mod loader;
