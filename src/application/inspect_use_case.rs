// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Serves the first few training batches exactly as a training
// loop would see them and renders them back to text, which is
// the quickest way to eyeball normalisation and the x/y shift.
//
//   Step 1: Build the loader              (Layer 4 - data)
//   Step 2: next_batch() up to N times    (Layer 4 - data)
//           valid_batch(i) up to N times
//   Step 3: Convert to Burn tensors       (Layer 4 - batcher)
//   Step 4: Decode row 0 of x and y       (Layer 3 - vocabulary)

use anyhow::Result;
use burn::backend::NdArray;
use ndarray::Array2;
use serde::Serialize;

use crate::data::{
    batcher::{WindowBatch, WindowBatcher},
    config::LoaderConfig,
    loader::CorpusLoader,
};
use crate::domain::vocabulary::Vocabulary;

/// Inspection runs on the CPU backend.
type InspectBackend = NdArray;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Valid,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchPreview {
    pub split:        Split,
    pub index:        usize,
    /// [batch_size, seq_length] as seen by the tensor backend
    pub tensor_shape: [usize; 2],
    pub input_ids:    Vec<i64>,
    pub target_ids:   Vec<i64>,
    pub input_text:   String,
    pub target_text:  String,
}

impl BatchPreview {
    fn new(
        split: Split,
        index: usize,
        batch: &WindowBatch<InspectBackend>,
        x: &Array2<i64>,
        y: &Array2<i64>,
        vocab: &Vocabulary,
    ) -> Self {
        let input_ids  = x.row(0).to_vec();
        let target_ids = y.row(0).to_vec();
        Self {
            split,
            index,
            tensor_shape: batch.inputs.dims(),
            input_text:   vocab.decode(&input_ids),
            target_text:  vocab.decode(&target_ids),
            input_ids,
            target_ids,
        }
    }
}

pub struct InspectUseCase {
    config:  LoaderConfig,
    batches: usize,
}

impl InspectUseCase {
    pub fn new(config: LoaderConfig, batches: usize) -> Self {
        Self { config, batches }
    }

    /// Up to `batches` training previews followed by up to
    /// `batches` validation previews.
    pub fn execute(&self) -> Result<Vec<BatchPreview>> {
        let mut loader = CorpusLoader::new(self.config.clone())?;
        let batcher    = WindowBatcher::<InspectBackend>::new(Default::default());

        tracing::info!(
            "Inspecting {} of {} training and {} validation batches",
            self.batches,
            loader.num_batches(),
            loader.num_valid_batches()
        );

        let mut previews = Vec::new();

        // ── Training: walk the cursor ─────────────────────────────────────────
        while loader.pointer() < self.batches {
            let index = loader.pointer();
            let Some((x, y)) = loader.next_batch() else { break };
            let batch = batcher.batch(&x, &y);
            previews.push(BatchPreview::new(Split::Train, index, &batch, &x, &y, loader.vocab()));
        }
        loader.reset_batch_pointer();

        // ── Validation: random access ─────────────────────────────────────────
        for index in 0..self.batches {
            let Some(pair) = loader.valid_batch(index) else { break };
            let batch = batcher.batch_pair(&pair);
            previews.push(BatchPreview::new(Split::Valid, index, &batch, &pair.x, &pair.y, loader.vocab()));
        }

        Ok(previews)
    }
}
