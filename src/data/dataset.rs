use burn::data::dataset::Dataset;
use ndarray::Array2;
use std::sync::Arc;

use crate::data::windows::BatchWindows;

/// One (input, target) window. Both have shape [batch_size, seq_length].
#[derive(Debug, Clone)]
pub struct WindowPair {
    pub x: Array2<i64>,
    pub y: Arc<Array2<i64>>,
}

impl WindowPair {
    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }
}

impl Dataset<WindowPair> for BatchWindows {
    fn get(&self, index: usize) -> Option<WindowPair> {
        self.pair(index).map(|(x, y)| WindowPair { x, y })
    }

    fn len(&self) -> usize {
        BatchWindows::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_view_matches_windows() {
        let windows: BatchWindows = BatchWindows::build(&(0..25).collect::<Vec<i64>>(), 2, 4).unwrap();
        assert_eq!(Dataset::<WindowPair>::len(&windows), 3);

        let pair = Dataset::<WindowPair>::get(&windows, 2).unwrap();
        assert_eq!(pair.shape(), (2, 4));
        assert_eq!(&pair.x, windows.x(2).unwrap());
        assert!(Dataset::<WindowPair>::get(&windows, 3).is_none());
    }
}
