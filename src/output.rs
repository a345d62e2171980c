//! Output formatting for calculation results.
//!
//! Supports plain-text rendering for the terminal and JSON serialization
//! for piping into other tools.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::engine::classify::{self, Category};
use crate::engine::types::{Breakdown, CalculationResult};

/// Highest required score the result view will show. Anything above it is
/// capped so an out-of-reach target cannot blow up the layout.
const DISPLAY_SCORE_CAP: f64 = 999.0;

/// One calculation packaged for export, with the classification already
/// applied.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub total_weight: f64,
    pub result: CalculationResult,
    pub category: Option<Category>,
}

impl Report {
    /// Wraps a calculation result, classifying it when it succeeded.
    pub fn new(total_weight: f64, result: CalculationResult) -> Self {
        let category = result
            .breakdown()
            .map(|b| classify::classify(b.required_score));
        Self {
            generated_at: Utc::now(),
            total_weight,
            result,
            category,
        }
    }
}

/// Formats a percentage with one decimal, the precision all calculator
/// messages use.
pub fn fmt_pct(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Clamps a required score to the displayable range. Negative requirements
/// mean the target is already secured and show as 0.
pub fn display_score(required: f64) -> f64 {
    if required <= 0.0 {
        0.0
    } else {
        required.min(DISPLAY_SCORE_CAP)
    }
}

/// Renders the full result card for a successful calculation.
pub fn render_breakdown(breakdown: &Breakdown) -> String {
    let category = classify::classify(breakdown.required_score);

    let headline = if category == Category::Secured {
        category.headline().to_string()
    } else {
        format!(
            "You need {} {}",
            fmt_pct(display_score(breakdown.required_score)),
            category.headline()
        )
    };

    let mut lines = vec![headline];
    lines.push(format!("Status: {}", category.status_text()));
    lines.push(format!(
        "Current weighted score: {}",
        fmt_pct(breakdown.current_weighted)
    ));
    lines.push(format!(
        "Weight completed: {}",
        fmt_pct(breakdown.completed_weight)
    ));
    lines.push(format!(
        "Final exam weight: {}",
        fmt_pct(breakdown.final_weight)
    ));
    lines.push(format!("Target grade: {}", fmt_pct(breakdown.target_grade)));
    lines.join("\n")
}

/// Renders either the result card or the validation message verbatim.
pub fn render_result(result: &CalculationResult) -> String {
    match result {
        CalculationResult::Success(breakdown) => render_breakdown(breakdown),
        CalculationResult::Failure { message } => message.clone(),
    }
}

/// Renders the live total-weight indicator line. The total is shown rounded
/// to two decimals; the state next to it uses the exact value, so 100 reads
/// as complete but 100.005 does not.
pub fn render_total_weight(total: f64) -> String {
    let rounded = (total * 100.0).round() / 100.0;
    let state = if total == 100.0 {
        "complete"
    } else if total > 100.0 {
        "over"
    } else {
        "under"
    };
    format!("Total weight: {}% ({})", rounded, state)
}

/// Prints a report in the terminal layout.
pub fn print_text(report: &Report) {
    println!("{}", render_total_weight(report.total_weight));
    println!("{}", render_result(&report.result));
}

/// Prints a report as pretty-printed JSON on stdout.
pub fn print_json(report: &Report) -> Result<()> {
    debug!(total_weight = report.total_weight, "serializing report");
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(required_score: f64) -> Breakdown {
        Breakdown {
            required_score,
            current_weighted: 51.0,
            target_grade: 85.0,
            final_weight: 40.0,
            completed_weight: 60.0,
        }
    }

    #[test]
    fn test_display_score_clamps_to_renderable_range() {
        assert_eq!(display_score(-5.0), 0.0);
        assert_eq!(display_score(0.0), 0.0);
        assert_eq!(display_score(42.5), 42.5);
        assert_eq!(display_score(1500.0), 999.0);
    }

    #[test]
    fn test_render_breakdown_achievable() {
        let text = render_breakdown(&breakdown(85.0));
        assert!(text.contains("You need 85.0% on your final exam"));
        assert!(text.contains("Status: Achievable! Keep studying"));
        assert!(text.contains("Current weighted score: 51.0%"));
        assert!(text.contains("Weight completed: 60.0%"));
        assert!(text.contains("Final exam weight: 40.0%"));
        assert!(text.contains("Target grade: 85.0%"));
    }

    #[test]
    fn test_render_breakdown_secured_swaps_headline() {
        let text = render_breakdown(&breakdown(-2.5));
        assert!(text.contains("Congratulations!"));
        assert!(text.contains("You've already secured your target grade!"));
        assert!(!text.contains("You need"));
    }

    #[test]
    fn test_render_failure_is_the_verbatim_message() {
        let result = CalculationResult::Failure {
            message: "Please enter the final exam weight.".to_string(),
        };
        assert_eq!(render_result(&result), "Please enter the final exam weight.");
    }

    #[test]
    fn test_render_total_weight_states() {
        assert_eq!(render_total_weight(100.0), "Total weight: 100% (complete)");
        assert_eq!(render_total_weight(110.0), "Total weight: 110% (over)");
        assert_eq!(render_total_weight(90.5), "Total weight: 90.5% (under)");
    }

    #[test]
    fn test_report_json_shape() {
        let report = Report::new(100.0, CalculationResult::Success(breakdown(85.0)));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["total_weight"], 100.0);
        assert_eq!(value["result"]["status"], "success");
        assert_eq!(value["result"]["required_score"], 85.0);
        assert_eq!(value["category"], "achievable");
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_report_json_failure_has_no_category() {
        let report = Report::new(
            90.0,
            CalculationResult::Failure {
                message: "Total weight is 90.0%. Weights must add up to exactly 100%.".to_string(),
            },
        );
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["result"]["status"], "failure");
        assert!(value["category"].is_null());
        assert!(
            value["result"]["message"]
                .as_str()
                .unwrap()
                .contains("90.0%")
        );
    }
}
