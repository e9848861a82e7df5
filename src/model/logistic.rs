//! Regularized logistic regression.
//!
//! Scoring is a plain sigmoid over a dense weight vector. Training uses
//! batch gradient descent on the L2-regularized binary cross-entropy, with
//! the sklearn convention that `C` is the inverse regularization strength.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const LEARNING_RATE: f64 = 0.1;
const MAX_ITER: usize = 1000;
const TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum FitError {
    #[error("cannot fit on an empty dataset")]
    EmptyDataset,

    #[error("row {row} has {got} features, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("targets length {targets} does not match {rows} rows")]
    TargetMismatch { rows: usize, targets: usize },

    #[error("regularization strength C must be positive, got {0}")]
    InvalidRegularization(f64),
}

/// Hyperparameters selected by randomized search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparams {
    /// Inverse regularization strength
    pub c: f64,
    /// Reweight classes inversely to their frequency
    pub balanced: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    /// Positive-class probability for a single feature vector.
    pub fn predict_proba(&self, x: &[f64]) -> f64 {
        let z: f64 = self
            .weights
            .iter()
            .zip(x)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }

    /// Class label at the fixed 0.5 decision threshold.
    pub fn predict(&self, x: &[f64]) -> u8 {
        u8::from(self.predict_proba(x) >= 0.5)
    }

    /// Fit by batch gradient descent.
    ///
    /// The intercept is not regularized. With `balanced` class weights each
    /// sample is weighted `n / (2 * n_class)`, so both classes contribute
    /// equally to the loss.
    pub fn fit(x: &[Vec<f64>], y: &[u8], params: &Hyperparams) -> Result<Self, FitError> {
        if x.is_empty() {
            return Err(FitError::EmptyDataset);
        }
        if x.len() != y.len() {
            return Err(FitError::TargetMismatch {
                rows: x.len(),
                targets: y.len(),
            });
        }
        if params.c <= 0.0 {
            return Err(FitError::InvalidRegularization(params.c));
        }

        let dim = x[0].len();
        for (row, r) in x.iter().enumerate() {
            if r.len() != dim {
                return Err(FitError::DimensionMismatch {
                    row,
                    expected: dim,
                    got: r.len(),
                });
            }
        }

        let n = x.len() as f64;
        let n_pos = y.iter().filter(|&&v| v == 1).count() as f64;
        let n_neg = n - n_pos;

        let (w_pos, w_neg) = if params.balanced && n_pos > 0.0 && n_neg > 0.0 {
            (n / (2.0 * n_pos), n / (2.0 * n_neg))
        } else {
            (1.0, 1.0)
        };
        let sample_weights: Vec<f64> = y
            .iter()
            .map(|&v| if v == 1 { w_pos } else { w_neg })
            .collect();
        let weight_sum: f64 = sample_weights.iter().sum();

        let mut weights = vec![0.0; dim];
        let mut intercept = 0.0;
        let reg = 1.0 / (params.c * weight_sum);

        for _ in 0..MAX_ITER {
            let mut grad_w = vec![0.0; dim];
            let mut grad_b = 0.0;

            for (i, row) in x.iter().enumerate() {
                let p = sigmoid(
                    weights.iter().zip(row).map(|(w, v)| w * v).sum::<f64>() + intercept,
                );
                let err = sample_weights[i] * (p - f64::from(y[i]));
                for (g, &v) in grad_w.iter_mut().zip(row) {
                    *g += err * v;
                }
                grad_b += err;
            }

            let mut norm_sq = 0.0;
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                let step = g / weight_sum + reg * *w;
                *w -= LEARNING_RATE * step;
                norm_sq += step * step;
            }
            let step_b = grad_b / weight_sum;
            intercept -= LEARNING_RATE * step_b;
            norm_sq += step_b * step_b;

            if norm_sq.sqrt() < TOLERANCE {
                break;
            }
        }

        Ok(Self { weights, intercept })
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z.clamp(-500.0, 500.0)).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Hyperparams {
        Hyperparams {
            c: 1.0,
            balanced: false,
        }
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(1000.0) <= 1.0);
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(2.0) > sigmoid(1.0));
    }

    #[test]
    fn test_fit_separable() {
        let x: Vec<Vec<f64>> = vec![
            vec![0.1],
            vec![0.2],
            vec![0.3],
            vec![0.4],
            vec![1.6],
            vec![1.7],
            vec![1.8],
            vec![1.9],
        ];
        let y = vec![0, 0, 0, 0, 1, 1, 1, 1];

        let model = LogisticModel::fit(&x, &y, &params()).unwrap();

        for (row, &label) in x.iter().zip(&y) {
            assert_eq!(model.predict(row), label);
        }
    }

    #[test]
    fn test_predict_threshold() {
        let model = LogisticModel {
            weights: vec![1.0],
            intercept: 0.0,
        };
        assert_eq!(model.predict(&[0.0]), 1); // p = 0.5 exactly
        assert_eq!(model.predict(&[-1.0]), 0);
        assert_eq!(model.predict(&[1.0]), 1);
    }

    #[test]
    fn test_proba_in_unit_interval() {
        let model = LogisticModel {
            weights: vec![10.0, -10.0],
            intercept: 3.0,
        };
        for x in [[100.0, 0.0], [0.0, 100.0], [0.0, 0.0]] {
            let p = model.predict_proba(&x);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_balanced_weights_shift_minority() {
        // 9:1 imbalance; balanced weighting should raise the minority-class
        // probability relative to the unbalanced fit.
        let mut x: Vec<Vec<f64>> = (0..9).map(|i| vec![0.1 * f64::from(i)]).collect();
        x.push(vec![1.5]);
        let mut y = vec![0u8; 9];
        y.push(1);

        let plain = LogisticModel::fit(&x, &y, &params()).unwrap();
        let balanced = LogisticModel::fit(
            &x,
            &y,
            &Hyperparams {
                c: 1.0,
                balanced: true,
            },
        )
        .unwrap();

        assert!(balanced.predict_proba(&[1.5]) > plain.predict_proba(&[1.5]));
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        assert!(matches!(
            LogisticModel::fit(&[], &[], &params()),
            Err(FitError::EmptyDataset)
        ));

        let x = vec![vec![1.0], vec![1.0, 2.0]];
        assert!(matches!(
            LogisticModel::fit(&x, &[0, 1], &params()),
            Err(FitError::DimensionMismatch { row: 1, .. })
        ));

        let x = vec![vec![1.0]];
        assert!(matches!(
            LogisticModel::fit(
                &x,
                &[0],
                &Hyperparams {
                    c: 0.0,
                    balanced: false
                }
            ),
            Err(FitError::InvalidRegularization(_))
        ));
    }

    #[test]
    fn test_fit_deterministic() {
        let x = vec![vec![0.2], vec![0.8], vec![1.4]];
        let y = vec![0, 1, 1];
        let a = LogisticModel::fit(&x, &y, &params()).unwrap();
        let b = LogisticModel::fit(&x, &y, &params()).unwrap();
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.intercept, b.intercept);
    }
}
