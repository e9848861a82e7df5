//! Classification metrics.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::LogisticModel;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EvalMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub roc_auc: f64,
}

/// Evaluate a fitted model on a labelled feature matrix.
pub fn evaluate(model: &LogisticModel, x: &[Vec<f64>], y: &[u8]) -> EvalMetrics {
    let probas: Vec<f64> = x.iter().map(|row| model.predict_proba(row)).collect();
    let preds: Vec<u8> = probas.iter().map(|&p| u8::from(p >= 0.5)).collect();

    let precision = precision(y, &preds);
    let recall = recall(y, &preds);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    EvalMetrics {
        accuracy: accuracy(y, &preds),
        precision,
        recall,
        f1,
        roc_auc: roc_auc(y, &probas),
    }
}

pub fn accuracy(y_true: &[u8], y_pred: &[u8]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    correct as f64 / y_true.len() as f64
}

pub fn precision(y_true: &[u8], y_pred: &[u8]) -> f64 {
    let tp = count(y_true, y_pred, 1, 1);
    let fp = count(y_true, y_pred, 0, 1);
    if tp + fp == 0 {
        return 0.0;
    }
    tp as f64 / (tp + fp) as f64
}

pub fn recall(y_true: &[u8], y_pred: &[u8]) -> f64 {
    let tp = count(y_true, y_pred, 1, 1);
    let fneg = count(y_true, y_pred, 1, 0);
    if tp + fneg == 0 {
        return 0.0;
    }
    tp as f64 / (tp + fneg) as f64
}

/// Rank-statistic ROC-AUC (Mann-Whitney), with tied scores assigned their
/// average rank. Degenerate single-class input scores 0.5.
pub fn roc_auc(y_true: &[u8], scores: &[f64]) -> f64 {
    let n_pos = y_true.iter().filter(|&&v| v == 1).count() as f64;
    let n_neg = y_true.len() as f64 - n_pos;
    if n_pos == 0.0 || n_neg == 0.0 {
        return 0.5;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        // 1-based ranks, averaged over the tie group
        let avg = (i + j + 2) as f64 / 2.0;
        for &k in &order[i..=j] {
            ranks[k] = avg;
        }
        i = j + 1;
    }

    let rank_sum: f64 = y_true
        .iter()
        .zip(&ranks)
        .filter(|(&t, _)| t == 1)
        .map(|(_, &r)| r)
        .sum();

    (rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg)
}

fn count(y_true: &[u8], y_pred: &[u8], t: u8, p: u8) -> usize {
    y_true
        .iter()
        .zip(y_pred)
        .filter(|(&yt, &yp)| yt == t && yp == p)
        .count()
}
