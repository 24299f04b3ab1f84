// ============================================================
// Layer 4 — Window Batcher
// ============================================================
// Converts one (x, y) window pair into Burn tensors so a
// training step can consume it directly.
//
// How batching works here:
//   Input:  x, y as ndarray Array2<i64> of shape [B, S]
//   Output: WindowBatch with Int tensors of shape [B, S]
//
//   The window is flattened row by row, then handed to Burn
//   together with its shape:
//   [r1_t1, ..., r1_tS, r2_t1, ..., rB_tS] → [B, S]
//
// Reference: Burn Book §4 (Batcher)
//            Rust Book §8 (Vectors)

use burn::{prelude::*, tensor::TensorData};
use ndarray::Array2;

use crate::data::dataset::WindowPair;

// ─── WindowBatch ──────────────────────────────────────────────────────────────
/// One training step's worth of next-token prediction data.
///
/// B is the Burn Backend (e.g. Wgpu, NdArray).
#[derive(Debug, Clone)]
pub struct WindowBatch<B: Backend> {
    /// Input token IDs — shape: [batch_size, seq_length]
    pub inputs: Tensor<B, 2, Int>,

    /// Target token IDs (inputs shifted by one) — same shape
    pub targets: Tensor<B, 2, Int>,
}

// ─── WindowBatcher ────────────────────────────────────────────────────────────
/// Holds the target device so tensors land on the right GPU/CPU.
#[derive(Clone, Debug)]
pub struct WindowBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> WindowBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    pub fn batch(&self, x: &Array2<i64>, y: &Array2<i64>) -> WindowBatch<B> {
        WindowBatch {
            inputs:  self.to_tensor(x),
            targets: self.to_tensor(y),
        }
    }

    pub fn batch_pair(&self, pair: &WindowPair) -> WindowBatch<B> {
        self.batch(&pair.x, &pair.y)
    }

    fn to_tensor(&self, window: &Array2<i64>) -> Tensor<B, 2, Int> {
        let (rows, cols) = window.dim();
        // iter() walks in logical (row-major) order whatever the memory layout
        let flat: Vec<i64> = window.iter().copied().collect();
        Tensor::<B, 2, Int>::from_data(TensorData::new(flat, [rows, cols]), &self.device)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::windows::BatchWindows;
    use burn::backend::NdArray;

    #[test]
    fn test_tensor_shapes_and_values() {
        let windows = BatchWindows::build(&[1, 2, 3, 4, 5, 6, 7], 2, 3).unwrap();
        let (x, y)  = windows.pair(0).unwrap();

        let batcher = WindowBatcher::<NdArray>::new(Default::default());
        let batch   = batcher.batch(&x, &y);

        assert_eq!(batch.inputs.dims(),  [2, 3]);
        assert_eq!(batch.targets.dims(), [2, 3]);

        let targets: Vec<i64> = batch.targets.into_data().iter::<i64>().collect();
        assert_eq!(targets, vec![2, 3, 4, 5, 6, 1]);
        let inputs: Vec<i64> = batch.inputs.into_data().iter::<i64>().collect();
        assert_eq!(inputs, vec![1, 2, 3, 4, 5, 6]);
    }
}
