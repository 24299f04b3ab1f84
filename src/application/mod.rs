// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for one user-facing goal.
//
// Rules for this layer:
//   - No text processing or array math here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Build or reuse artifacts and summarise the corpus
pub mod prepare_use_case;

// Walk the first few batches and render them as text
pub mod inspect_use_case;
