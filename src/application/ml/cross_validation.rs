//! Seeded hold-out split and k-fold index generation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::ops::Range;

/// Row indices of a hold-out split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldoutSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Number of rows held out for `n` samples at `test_fraction`, rounded up.
pub fn test_size(n: usize, test_fraction: f64) -> usize {
    ((n as f64) * test_fraction).ceil() as usize
}

/// Shuffles `0..n` with `seed` and holds out the first `test_size` indices.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> HoldoutSplit {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = test_size(n, test_fraction).min(n);
    let train = indices.split_off(n_test);
    HoldoutSplit {
        train,
        test: indices,
    }
}

/// Contiguous, unshuffled k-fold ranges over `n` rows.
///
/// The first `n % k` folds get one extra row.
pub fn kfold_ranges(n: usize, k: usize) -> Vec<Range<usize>> {
    if k == 0 {
        return Vec::new();
    }
    let base = n / k;
    let extra = n % k;

    let mut start = 0;
    (0..k)
        .map(|fold| {
            let len = base + usize::from(fold < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// Splits `rows` into (fit, validation) parts for a fold range.
pub fn split_fold<T: Clone>(rows: &[T], fold: &Range<usize>) -> (Vec<T>, Vec<T>) {
    let mut fit = Vec::with_capacity(rows.len() - fold.len());
    fit.extend_from_slice(&rows[..fold.start]);
    fit.extend_from_slice(&rows[fold.end..]);
    (fit, rows[fold.clone()].to_vec())
}
