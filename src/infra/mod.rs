// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches persisted files:
//
//   vocab_store.rs  — vocab.pkl, the ordered token list
//                     (bincode)
//
//   tensor_store.rs — data.npy, the encoded corpus as a
//                     NumPy-compatible int64 array
//
//   checkpoint.rs   — saving and restoring Burn modules
//                     under checkpoint_dir/dataset_name/
//
// The two artifact stores implement the ArtifactStore trait
// from Layer 3, which is all the corpus loader relies on.
// Both write through write_atomic, so a reader sees either the
// old file or the complete new one.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Vocabulary persistence
pub mod vocab_store;

/// Encoded corpus persistence (.npy)
pub mod tensor_store;

/// Model checkpoint saving and loading
pub mod checkpoint;

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Write `bytes` to a sibling `<name>.tmp` file, then rename it
/// over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes)
        .with_context(|| format!("Cannot write '{}'", tmp.display()))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Cannot replace '{}'", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_replaces_and_cleans_up() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.npy");

        write_atomic(&path, b"old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert!(!dir.path().join("data.npy.tmp").exists());
    }

    #[test]
    fn test_write_atomic_failure_keeps_no_temp_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.npy");
        fs::create_dir(&path).unwrap();

        assert!(write_atomic(&path, b"ids").is_err());
        assert!(path.is_dir());
        assert!(!dir.path().join("data.npy.tmp").exists());
    }
}
