//! Seeded stratified splitting.

use rand::seq::SliceRandom;
use rand::Rng;

/// Split indices into (rest, holdout), preserving the class ratio of `y`
/// within each part. `holdout_fraction` is taken per class.
pub fn stratified_split(
    y: &[u8],
    holdout_fraction: f64,
    rng: &mut impl Rng,
) -> (Vec<usize>, Vec<usize>) {
    let mut rest = Vec::new();
    let mut holdout = Vec::new();

    for class in [0u8, 1] {
        let mut idx: Vec<usize> = y
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == class)
            .map(|(i, _)| i)
            .collect();
        idx.shuffle(rng);

        let n_holdout = (idx.len() as f64 * holdout_fraction).round() as usize;
        holdout.extend_from_slice(&idx[..n_holdout]);
        rest.extend_from_slice(&idx[n_holdout..]);
    }

    rest.sort_unstable();
    holdout.sort_unstable();
    (rest, holdout)
}

/// Stratified k-fold assignment: shuffled per-class indices dealt
/// round-robin into `k` folds. Returns the validation indices of each fold.
pub fn stratified_kfold(y: &[u8], k: usize, rng: &mut impl Rng) -> Vec<Vec<usize>> {
    let mut folds: Vec<Vec<usize>> = vec![Vec::new(); k];

    for class in [0u8, 1] {
        let mut idx: Vec<usize> = y
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == class)
            .map(|(i, _)| i)
            .collect();
        idx.shuffle(rng);

        for (i, sample) in idx.into_iter().enumerate() {
            folds[i % k].push(sample);
        }
    }

    for fold in &mut folds {
        fold.sort_unstable();
    }
    folds
}
