// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that define what the pipeline works with:
//
//   special.rs    — the six reserved tokens and their fixed IDs
//   vocabulary.rs — token <-> ID mapping built from frequencies
//   error.rs      — typed failures the loader can raise
//   traits.rs     — seams implemented by the data and infra layers
//
// Rules for this layer:
//   - NO tensor framework types
//   - NO file I/O
//   - Only plain structs, enums and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

/// Reserved tokens (PAD, GO, EOS, UNK, SPACE, NEWLINE)
pub mod special;

/// Frequency-pruned character vocabulary
pub mod vocabulary;

/// Typed pipeline errors
pub mod error;

/// Core abstractions (traits) that other layers implement
pub mod traits;
