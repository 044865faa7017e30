//! Weighted grade-point average over a set of subject records.
//!
//! The engine is a pure reduction: no state, no I/O, and no error path. Input
//! validation belongs to the caller (see [`crate::subject`]).

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Anything that carries a grade and a credit weight.
pub trait Graded {
    fn grade(&self) -> f64;
    fn credits(&self) -> f64;
}

/// Result of [`compute_summary`].
///
/// Serialized as `{"weightedSum", "totalCredits", "average"}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSummary {
    pub weighted_sum: f64,
    pub total_credits: f64,
    pub average: f64,
}

impl GradeSummary {
    /// The summary of an empty subject list.
    pub const EMPTY: GradeSummary = GradeSummary {
        weighted_sum: 0.0,
        total_credits: 0.0,
        average: 0.0,
    };

    /// `true` when there is weight to average over.
    pub fn has_credits(&self) -> bool {
        self.total_credits > 0.0
    }
}

/// Computes the weighted sum, total credits and rounded average of `subjects`.
///
/// Returns [`GradeSummary::EMPTY`]-valued averages when the total weight is
/// zero or negative; never divides by zero.
pub fn compute_summary<T: Graded>(subjects: &[T]) -> GradeSummary {
    if subjects.is_empty() {
        return GradeSummary::EMPTY;
    }

    let mut products: Vec<f64> = subjects.iter().map(|s| s.grade() * s.credits()).collect();
    let mut weights: Vec<f64> = subjects.iter().map(Graded::credits).collect();

    // Sum in a canonical order so the result does not depend on input order.
    products.sort_by(f64::total_cmp);
    weights.sort_by(f64::total_cmp);

    let weighted_sum: f64 = products.iter().sum();
    let total_credits: f64 = weights.iter().sum();

    let average = if total_credits > 0.0 {
        round_to_hundredths(weighted_sum / total_credits)
    } else {
        0.0
    };

    trace!(
        subjects = subjects.len(),
        weighted_sum, total_credits, average, "Computed grade summary"
    );

    GradeSummary {
        weighted_sum,
        total_credits,
        average,
    }
}

/// Rounds to two decimal places, ties away from zero.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
