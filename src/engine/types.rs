//! Data types shared across the calculation engine.

use serde::Serialize;

/// A single graded course item: a weight and an optional recorded score.
///
/// `name` is for display only and never enters the computation. Weight and
/// score are percentages; values outside [0, 100] are accepted as entered
/// and computed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub id: u64,
    pub name: String,
    pub weight: f64,
    pub score: Option<f64>,
}

impl Component {
    /// A freshly added component: empty name, zero weight, no score yet.
    pub fn blank(id: u64) -> Self {
        Self {
            id,
            name: String::new(),
            weight: 0.0,
            score: None,
        }
    }
}

/// Snapshot of everything one calculation needs. Rebuilt from session state
/// on every request and discarded afterwards; never stored.
#[derive(Debug, Clone)]
pub struct CalculationInput {
    pub components: Vec<Component>,
    pub final_weight: f64,
    pub target_grade: Option<f64>,
    pub scenario_value: u8,
}

/// Numeric breakdown of a successful calculation. All values are raw
/// percentages; rounding is left to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakdown {
    pub required_score: f64,
    pub current_weighted: f64,
    pub target_grade: f64,
    pub final_weight: f64,
    pub completed_weight: f64,
}

/// Outcome of a calculation request.
///
/// Validation failures are ordinary values carrying the message shown to
/// the user verbatim; the engine never panics on bad input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculationResult {
    Success(Breakdown),
    Failure { message: String },
}

impl CalculationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CalculationResult::Success(_))
    }

    /// The numeric breakdown, if the calculation succeeded.
    pub fn breakdown(&self) -> Option<&Breakdown> {
        match self {
            CalculationResult::Success(breakdown) => Some(breakdown),
            CalculationResult::Failure { .. } => None,
        }
    }
}
