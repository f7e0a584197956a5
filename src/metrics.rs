/**
This module computes recall, precision and F-measure from entity counts. A division by zero never
fails: its result is replaced by 0, whichever denominator is null.
*/
use num::{Float, NumCast};
use serde::Serialize;

/// Divides `numerator` by `denominator`, returning 0 when the denominator is 0.
pub(crate) fn prf_divide<F: Float>(numerator: F, denominator: F) -> F {
    if denominator == F::zero() {
        F::zero()
    } else {
        numerator / denominator
    }
}

/// Ratio of two counts, or 0 when `denominator` is 0.
pub fn ratio<F: Float>(numerator: usize, denominator: usize) -> F {
    match (
        <F as NumCast>::from(numerator),
        <F as NumCast>::from(denominator),
    ) {
        (Some(n), Some(d)) => prf_divide(n, d),
        _ => F::zero(),
    }
}

/// Harmonic mean of recall and precision, or 0 when both are 0.
pub fn f_measure<F: Float>(recall: F, precision: F) -> F {
    let two = F::one() + F::one();
    prf_divide(two * recall * precision, recall + precision)
}

/// Recall, precision and F-measure of a set of predictions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Scores {
    pub recall: f64,
    pub precision: f64,
    pub f_measure: f64,
}

impl Scores {
    /// * `correct`: predictions matching a reference entity
    /// * `possible`: reference entities
    /// * `predicted`: predictions
    pub fn from_counts(correct: usize, possible: usize, predicted: usize) -> Self {
        let recall = ratio(correct, possible);
        let precision = ratio(correct, predicted);
        Scores {
            recall,
            precision,
            f_measure: f_measure(recall, precision),
        }
    }
}
