//! Solves the weighted-average formula for the score required on the final
//! exam to reach the target grade.

use crate::engine::types::{Breakdown, CalculationInput, CalculationResult, Component};
use crate::engine::validate::{ValidationError, validate};

/// Returns a copy of `components` with the scenario value filled in for
/// every component that has weight but no recorded score.
///
/// Components that already carry a score keep it, and weight-0 components
/// are never substituted: they cannot move the result and stay exactly as
/// entered.
pub fn apply_scenario(components: &[Component], scenario_value: u8) -> Vec<Component> {
    components
        .iter()
        .map(|c| {
            if c.score.is_none() && c.weight > 0.0 {
                Component {
                    score: Some(f64::from(scenario_value)),
                    ..c.clone()
                }
            } else {
                c.clone()
            }
        })
        .collect()
}

/// Runs one calculation over an input snapshot.
///
/// Validation failures come back as [`CalculationResult::Failure`] carrying
/// the validator's message unchanged. Successful results are raw numbers;
/// rounding and clamping belong to the presentation layer.
pub fn calculate(input: &CalculationInput) -> CalculationResult {
    if let Err(e) = validate(&input.components, input.final_weight, input.target_grade) {
        return CalculationResult::Failure {
            message: e.to_string(),
        };
    }

    let Some(target_grade) = input.target_grade else {
        return CalculationResult::Failure {
            message: ValidationError::MissingTargetGrade.to_string(),
        };
    };

    let adjusted = apply_scenario(&input.components, input.scenario_value);

    let mut current_weighted = 0.0;
    let mut completed_weight = 0.0;
    for c in &adjusted {
        if let Some(score) = c.score {
            if c.weight > 0.0 {
                current_weighted += score * c.weight / 100.0;
                completed_weight += c.weight;
            }
        }
    }

    // The validator rejected final_weight <= 0, so the division is safe.
    let final_fraction = input.final_weight / 100.0;
    let required_score = (target_grade - current_weighted) / final_fraction;

    CalculationResult::Success(Breakdown {
        required_score,
        current_weighted,
        target_grade,
        final_weight: input.final_weight,
        completed_weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(id: u64, weight: f64, score: Option<f64>) -> Component {
        Component {
            id,
            name: String::new(),
            weight,
            score,
        }
    }

    fn input(
        components: Vec<Component>,
        final_weight: f64,
        target_grade: f64,
        scenario_value: u8,
    ) -> CalculationInput {
        CalculationInput {
            components,
            final_weight,
            target_grade: Some(target_grade),
            scenario_value,
        }
    }

    #[test]
    fn test_two_scored_components_boundary_target() {
        let input = input(
            vec![comp(0, 30.0, Some(80.0)), comp(1, 30.0, Some(90.0))],
            40.0,
            85.0,
            0,
        );

        let CalculationResult::Success(b) = calculate(&input) else {
            panic!("expected success");
        };
        assert_eq!(b.current_weighted, 51.0);
        assert_eq!(b.required_score, 85.0);
        assert_eq!(b.completed_weight, 60.0);
        assert_eq!(b.target_grade, 85.0);
        assert_eq!(b.final_weight, 40.0);
    }

    #[test]
    fn test_target_already_secured_goes_negative() {
        let input = input(
            vec![comp(0, 30.0, Some(80.0)), comp(1, 30.0, Some(90.0))],
            40.0,
            50.0,
            0,
        );

        let CalculationResult::Success(b) = calculate(&input) else {
            panic!("expected success");
        };
        assert_eq!(b.required_score, -2.5);
    }

    #[test]
    fn test_scenario_fills_unscored_components() {
        let input = input(vec![comp(0, 50.0, None)], 50.0, 70.0, 60);

        let CalculationResult::Success(b) = calculate(&input) else {
            panic!("expected success");
        };
        assert_eq!(b.current_weighted, 30.0);
        assert_eq!(b.required_score, 80.0);
        assert_eq!(b.completed_weight, 50.0);
    }

    #[test]
    fn test_final_exam_only_course() {
        let input = input(vec![], 100.0, 110.0, 0);

        let CalculationResult::Success(b) = calculate(&input) else {
            panic!("expected success");
        };
        assert_eq!(b.current_weighted, 0.0);
        assert_eq!(b.required_score, 110.0);
        assert_eq!(b.completed_weight, 0.0);
    }

    #[test]
    fn test_validation_failure_message_forwarded_verbatim() {
        let input = input(vec![comp(0, 50.0, None)], 40.0, 70.0, 0);

        assert_eq!(
            calculate(&input),
            CalculationResult::Failure {
                message: "Total weight is 90.0%. Weights must add up to exactly 100%.".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_final_weight_fails_before_anything_else() {
        let input = CalculationInput {
            components: vec![comp(0, 100.0, Some(90.0))],
            final_weight: 0.0,
            target_grade: None,
            scenario_value: 0,
        };

        assert_eq!(
            calculate(&input),
            CalculationResult::Failure {
                message: "Please enter the final exam weight.".to_string(),
            }
        );
    }

    #[test]
    fn test_scenario_never_touches_present_scores() {
        let components = vec![comp(0, 30.0, Some(80.0)), comp(1, 30.0, Some(90.0))];

        let base = calculate(&input(components.clone(), 40.0, 85.0, 0));
        for scenario in [1, 50, 77, 100] {
            let shifted = calculate(&input(components.clone(), 40.0, 85.0, scenario));
            assert_eq!(base, shifted, "scenario {scenario} changed a scored course");
        }
    }

    #[test]
    fn test_weight_zero_components_stay_blank() {
        let adjusted = apply_scenario(&[comp(0, 0.0, None), comp(1, 60.0, None)], 75);

        assert_eq!(adjusted[0].score, None);
        assert_eq!(adjusted[1].score, Some(75.0));
    }

    #[test]
    fn test_apply_scenario_is_identity_when_all_scored() {
        let components = vec![comp(0, 40.0, Some(62.5)), comp(1, 20.0, Some(98.0))];
        assert_eq!(apply_scenario(&components, 100), components);
    }

    #[test]
    fn test_weight_zero_scored_component_adds_nothing() {
        let input = input(
            vec![comp(0, 0.0, Some(100.0)), comp(1, 60.0, Some(50.0))],
            40.0,
            60.0,
            0,
        );

        let CalculationResult::Success(b) = calculate(&input) else {
            panic!("expected success");
        };
        assert_eq!(b.current_weighted, 30.0);
        assert_eq!(b.completed_weight, 60.0);
    }

    #[test]
    fn test_required_score_is_always_finite_once_validated() {
        for final_weight in [0.01, 0.5, 1.0, 10.0, 40.0, 99.99, 100.0] {
            let rest = 100.0 - final_weight;
            let components = if rest > 0.0 {
                vec![comp(0, rest, Some(50.0))]
            } else {
                vec![]
            };

            let result = calculate(&input(components, final_weight, 95.0, 0));
            let Some(b) = result.breakdown() else {
                panic!("validation unexpectedly failed for final_weight {final_weight}");
            };
            assert!(
                b.required_score.is_finite(),
                "final_weight {final_weight} produced {}",
                b.required_score
            );
        }
    }

    #[test]
    fn test_out_of_range_scores_compute_through() {
        // Scores above 100 are accepted as entered, not clamped.
        let input = input(vec![comp(0, 60.0, Some(150.0))], 40.0, 85.0, 0);

        let CalculationResult::Success(b) = calculate(&input) else {
            panic!("expected success");
        };
        assert_eq!(b.current_weighted, 90.0);
        assert_eq!(b.required_score, -12.5);
    }
}
