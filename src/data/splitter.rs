// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Cuts the encoded corpus into two contiguous parts:
//   - Training set:   the first floor(len * fraction) elements
//   - Validation set: everything after that
//
// No shuffling. The encoded corpus is one long token stream
// and the batch windows rely on its order, so the split keeps
// positions as encoded and is identical every time it is
// recomputed from the same tensor.
//
// Default fraction: 0.999 (see data/config.rs)
//
// Reference: Rust Book §8 (Vectors)

/// Split `samples` into (train, validation) by position.
///
/// # Arguments
/// * `samples`        - The full sequence (consumed by this function)
/// * `train_fraction` - Proportion for training, e.g. 0.999
///
/// # Example
/// ```ignore
/// let (train, val) = split_train_val((0..1000).collect::<Vec<_>>(), 0.999);
/// assert_eq!((train.len(), val.len()), (999, 1));
/// ```
pub fn split_train_val<T>(mut samples: Vec<T>, train_fraction: f64) -> (Vec<T>, Vec<T>) {
    let total    = samples.len();
    // `as usize` truncates toward zero, i.e. floor for positive values
    let split_at = ((total as f64) * train_fraction) as usize;
    let split_at = split_at.min(total);

    // After this: samples = [0..split_at], val = [split_at..total]
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Corpus split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..2000).collect();
        let (train, val)      = split_train_val(items, 0.999);
        assert_eq!(train.len(), 1998);
        assert_eq!(val.len(),   2);
    }

    #[test]
    fn test_split_floors() {
        // 100 * 0.999 = 99.9 → 99
        let items: Vec<usize> = (0..100).collect();
        let (train, val)      = split_train_val(items, 0.999);
        assert_eq!(train.len(), 99);
        assert_eq!(val, vec![99]);
    }

    #[test]
    fn test_order_preserved() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_train_val(items, 0.7);
        assert_eq!(train, (0..7).collect::<Vec<_>>());
        assert_eq!(val,   vec![7, 8, 9]);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, val)      = split_train_val(items, 0.999);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_full_training_split() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_train_val(items, 1.0);
        assert_eq!(train.len(), 10);
        assert!(val.is_empty());
    }
}
