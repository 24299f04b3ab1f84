// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores any Burn module using CompactRecorder.
//
// File naming convention:
//   {checkpoint_dir}/
//     {dataset_name}/
//       {model_name}.<recorder extension>   ← module weights
//       latest.json                          ← most recent model_name
//
// model_name is the module's bare type name ("Linear",
// "CharRnn", ...), falling back to "Reader" if the type name is
// empty.
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use burn::{
    module::Module,
    prelude::*,
    record::{CompactRecorder, FileRecorder, Recorder},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

const LATEST_FILE: &str = "latest.json";
const FALLBACK_MODEL_NAME: &str = "Reader";

/// Contents of latest.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LatestCheckpoint {
    model_name: String,
}

/// Manages saving and loading of module checkpoints.
pub struct CheckpointManager {
    /// Root directory; one subdirectory per dataset
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the checkpoints for `dataset_name`.
    pub fn dataset_dir(&self, dataset_name: &str) -> PathBuf {
        self.dir.join(dataset_name)
    }

    /// Persist every parameter of `module` under
    /// {dir}/{dataset_name}/{model_name} and mark it as the most
    /// recent checkpoint.
    pub fn save<B, M>(&self, module: &M, dataset_name: &str) -> Result<PathBuf>
    where
        B: Backend,
        M: Module<B>,
    {
        let dir = self.dataset_dir(dataset_name);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create checkpoint dir '{}'", dir.display()))?;

        let model_name = model_name::<M>();
        let path       = dir.join(&model_name);

        tracing::info!("Saving checkpoint '{}'", path.display());
        <CompactRecorder as Recorder<B>>::record(
            &CompactRecorder::new(),
            module.clone().into_record(),
            path.clone(),
        )
        .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;

        let latest = LatestCheckpoint { model_name };
        fs::write(dir.join(LATEST_FILE), serde_json::to_string(&latest)?)
            .with_context(|| format!("Failed to write {LATEST_FILE}"))?;

        Ok(path)
    }

    /// Restore the most recent checkpoint for `dataset_name` into
    /// `module`. Returns `None` when no checkpoint exists yet.
    ///
    /// `module` must have the same architecture as the saved one.
    pub fn load<B, M>(&self, module: M, dataset_name: &str, device: &B::Device) -> Result<Option<M>>
    where
        B: Backend,
        M: Module<B>,
    {
        let dir         = self.dataset_dir(dataset_name);
        let latest_path = dir.join(LATEST_FILE);

        tracing::info!("Loading checkpoints from '{}'", dir.display());
        if !latest_path.is_file() {
            return Ok(None);
        }

        let latest: LatestCheckpoint = serde_json::from_str(
            &fs::read_to_string(&latest_path)
                .with_context(|| format!("Cannot read '{}'", latest_path.display()))?,
        )
        .with_context(|| format!("Malformed '{}'", latest_path.display()))?;

        let path = dir.join(&latest.model_name);
        let file = path.with_extension(<CompactRecorder as FileRecorder<B>>::file_extension());
        if !file.is_file() {
            tracing::warn!("'{}' names a missing checkpoint", latest_path.display());
            return Ok(None);
        }

        let record = <CompactRecorder as Recorder<B>>::load(&CompactRecorder::new(), path.clone(), device)
            .with_context(|| format!("Cannot load checkpoint '{}'", path.display()))?;

        Ok(Some(module.load_record(record)))
    }
}

/// Bare type name of `M` without module path or generics.
pub fn model_name<M>() -> String {
    let full = std::any::type_name::<M>();
    let base = full.split('<').next().unwrap_or(full);
    let name = base.rsplit("::").next().unwrap_or(base);
    if name.is_empty() {
        FALLBACK_MODEL_NAME.to_string()
    } else {
        name.to_string()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::nn::{Linear, LinearConfig};

    type TestBackend = NdArray;

    #[test]
    fn test_model_name_strips_path_and_generics() {
        assert_eq!(model_name::<Linear<TestBackend>>(), "Linear");
        assert_eq!(model_name::<Vec<u8>>(), "Vec");
    }

    #[test]
    fn test_save_then_load_latest() {
        let dir     = tempfile::tempdir().unwrap();
        let device  = Default::default();
        let manager = CheckpointManager::new(dir.path());

        let model: Linear<TestBackend> = LinearConfig::new(3, 2).init(&device);
        let saved = manager.save::<TestBackend, _>(&model, "poems").unwrap();
        assert_eq!(saved, dir.path().join("poems").join("Linear"));
        assert!(dir.path().join("poems").join("latest.json").is_file());

        let fresh: Linear<TestBackend> = LinearConfig::new(3, 2).init(&device);
        let loaded = manager.load::<TestBackend, _>(fresh, "poems", &device).unwrap().expect("checkpoint found");

        let before: Vec<f32> = model.weight.val().into_data().iter::<f32>().collect();
        let after:  Vec<f32> = loaded.weight.val().into_data().iter::<f32>().collect();
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(&after) {
            // CompactRecorder stores half precision
            assert!((a - b).abs() < 1e-2, "{a} vs {b}");
        }
    }

    #[test]
    fn test_load_without_checkpoint_is_none() {
        let dir     = tempfile::tempdir().unwrap();
        let device  = Default::default();
        let manager = CheckpointManager::new(dir.path());

        let model: Linear<TestBackend> = LinearConfig::new(3, 2).init(&device);
        assert!(manager.load::<TestBackend, _>(model, "unknown", &device).unwrap().is_none());
    }
}
