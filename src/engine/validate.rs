//! Input validation for calculation requests.
//!
//! Failures are returned as values and surfaced to the user verbatim;
//! nothing in here panics or logs.

use thiserror::Error;

use crate::engine::types::Component;

/// Combined weights must land within this band around 100%.
const WEIGHT_SUM_MIN: f64 = 99.99;
const WEIGHT_SUM_MAX: f64 = 100.01;

/// Why a calculation request was rejected. The `Display` strings are the
/// exact messages shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please enter the final exam weight.")]
    MissingFinalWeight,
    #[error("Please select or enter a target grade.")]
    MissingTargetGrade,
    #[error("Total weight is {total:.1}%. Weights must add up to exactly 100%.")]
    WeightMismatch { total: f64 },
}

/// Checks a calculation request. Rules run in order and the first failing
/// rule wins:
///
/// 1. the final-exam weight must be positive;
/// 2. a target grade must be present (and finite);
/// 3. component weights plus the final weight must sum to 100%, within a
///    ±0.01 floating-point tolerance.
pub fn validate(
    components: &[Component],
    final_weight: f64,
    target_grade: Option<f64>,
) -> Result<(), ValidationError> {
    if final_weight.is_nan() || final_weight <= 0.0 {
        return Err(ValidationError::MissingFinalWeight);
    }

    match target_grade {
        Some(target) if target.is_finite() => {}
        _ => return Err(ValidationError::MissingTargetGrade),
    }

    let total = components.iter().map(|c| c.weight).sum::<f64>() + final_weight;
    if !(WEIGHT_SUM_MIN..=WEIGHT_SUM_MAX).contains(&total) {
        return Err(ValidationError::WeightMismatch { total });
    }

    Ok(())
}
