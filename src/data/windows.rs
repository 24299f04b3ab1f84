// ============================================================
// Layer 4 — Batch Windows
// ============================================================
// Turns one split of the encoded corpus into next-token
// prediction windows.
//
// With batch_size = B and seq_length = S:
//
//   num_batches = floor(len / (B * S))
//   data        = split[..num_batches * B * S]
//
//   x = data reshaped to B rows          (row length num_batches * S)
//   y = data shifted left by one, with the last element taken
//       from the FIRST element of the whole truncated split
//
//   x_batches[k] = x[:, k*S .. (k+1)*S]
//   y_batches[k] = y[:, k*S .. (k+1)*S]
//
// Example (B=2, S=3, split = [1,2,3,4,5,6,7]):
//   data = [1,2,3,4,5,6]
//   x    = [[1,2,3],[4,5,6]]
//   y    = [[2,3,4],[5,6,1]]     ← 1 wraps round from data[0]
//
// Note the wrap goes to the start of the split, not to the
// start of the current batch. Changing that would change the
// loss at every batch boundary.
//
// Reference: ndarray crate documentation (slicing with s![])

use anyhow::Result;
use ndarray::{s, Array2};
use std::sync::Arc;

/// All windows cut from one split.
#[derive(Debug, Clone, Default)]
pub struct BatchWindows {
    x: Vec<Array2<i64>>,
    y: Vec<Arc<Array2<i64>>>,
}

impl BatchWindows {
    /// How many full windows fit in `len` elements.
    pub fn count_for(len: usize, batch_size: usize, seq_length: usize) -> usize {
        match batch_size.checked_mul(seq_length) {
            Some(window) if window > 0 => len / window,
            _ => 0,
        }
    }

    /// Cut `split` into windows. A split too small for a single
    /// window yields an empty set; deciding whether that is an
    /// error is up to the caller.
    pub fn build(split: &[i64], batch_size: usize, seq_length: usize) -> Result<Self> {
        let num_batches = Self::count_for(split.len(), batch_size, seq_length);
        if num_batches == 0 {
            return Ok(Self::default());
        }

        let used  = num_batches * batch_size * seq_length;
        let xdata = split[..used].to_vec();

        let mut ydata = Vec::with_capacity(used);
        ydata.extend_from_slice(&xdata[1..]);
        ydata.push(xdata[0]);

        let row_len = num_batches * seq_length;
        let x_full  = Array2::from_shape_vec((batch_size, row_len), xdata)?;
        let y_full  = Array2::from_shape_vec((batch_size, row_len), ydata)?;

        let block = |full: &Array2<i64>, k: usize| {
            full.slice(s![.., k * seq_length..(k + 1) * seq_length]).to_owned()
        };

        let x = (0..num_batches).map(|k| block(&x_full, k)).collect();
        let y = (0..num_batches).map(|k| Arc::new(block(&y_full, k))).collect();

        Ok(Self { x, y })
    }

    /// Number of windows.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Elements covered by all windows together.
    pub fn element_count(&self) -> usize {
        self.x.iter().map(|w| w.len()).sum()
    }

    pub fn x(&self, index: usize) -> Option<&Array2<i64>> {
        self.x.get(index)
    }

    pub fn y(&self, index: usize) -> Option<&Arc<Array2<i64>>> {
        self.y.get(index)
    }

    /// Input window as an owned copy, target window shared.
    pub fn pair(&self, index: usize) -> Option<(Array2<i64>, Arc<Array2<i64>>)> {
        let x = self.x.get(index)?;
        let y = self.y.get(index)?;
        Some((x.clone(), Arc::clone(y)))
    }
}
