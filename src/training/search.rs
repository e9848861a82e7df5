//! Randomized hyperparameter search with cross-validated ROC-AUC scoring.

use rand::seq::SliceRandom;
use rand::Rng;

use super::metrics::roc_auc;
use super::split::stratified_kfold;
use crate::model::{FitError, Hyperparams, LogisticModel};

#[derive(Debug, Clone, Copy)]
pub struct SearchResult {
    pub params: Hyperparams,
    pub cv_score: f64,
}

/// 20 values of C, log-spaced over [1e-3, 1e2].
pub fn c_grid() -> Vec<f64> {
    (0..20)
        .map(|i| 10f64.powf(-3.0 + 5.0 * f64::from(i) / 19.0))
        .collect()
}

/// Sample `n_iter` candidates without replacement from the C x class-weight
/// grid, score each by mean ROC-AUC over stratified k-fold CV, return the
/// best.
pub fn randomized_search(
    x: &[Vec<f64>],
    y: &[u8],
    n_iter: usize,
    folds: usize,
    rng: &mut impl Rng,
) -> Result<SearchResult, FitError> {
    let mut candidates: Vec<Hyperparams> = c_grid()
        .into_iter()
        .flat_map(|c| {
            [
                Hyperparams { c, balanced: false },
                Hyperparams { c, balanced: true },
            ]
        })
        .collect();
    candidates.shuffle(rng);
    candidates.truncate(n_iter.min(candidates.len()));

    // Same folds for every candidate
    let fold_sets = stratified_kfold(y, folds, rng);

    let mut best: Option<SearchResult> = None;

    for params in candidates {
        let mut scores = Vec::with_capacity(fold_sets.len());

        for val_fold in &fold_sets {
            let mut in_val = vec![false; y.len()];
            for &i in val_fold {
                in_val[i] = true;
            }

            let mut x_train = Vec::with_capacity(y.len() - val_fold.len());
            let mut y_train = Vec::with_capacity(y.len() - val_fold.len());
            for (i, row) in x.iter().enumerate() {
                if !in_val[i] {
                    x_train.push(row.clone());
                    y_train.push(y[i]);
                }
            }

            let model = LogisticModel::fit(&x_train, &y_train, &params)?;

            let y_val: Vec<u8> = val_fold.iter().map(|&i| y[i]).collect();
            let probas: Vec<f64> = val_fold.iter().map(|&i| model.predict_proba(&x[i])).collect();
            scores.push(roc_auc(&y_val, &probas));
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        tracing::debug!(
            c = params.c,
            balanced = params.balanced,
            cv_roc_auc = mean,
            "Search candidate scored"
        );

        if best.map_or(true, |b| mean > b.cv_score) {
            best = Some(SearchResult {
                params,
                cv_score: mean,
            });
        }
    }

    best.ok_or(FitError::EmptyDataset)
}
