//! The input side of the engine: discrete events sent by the presentation
//! layer, and the lenient parsing applied to raw field text.
//!
//! Raw text that does not parse to a finite number means "absent": a weight
//! falls back to 0 and a score to "no score yet". Bad field text is never an
//! error at this layer; validation happens when a calculation runs.

/// Which field of a component a raw edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentField {
    Name,
    Weight,
    Score,
}

/// A discrete input event from the presentation layer.
///
/// Data-changing events re-arm the debounced recalculation. `CalculateNow`
/// runs immediately instead, and `Reset` returns the session to its seeded
/// starting state.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Raw text typed into one field of one component.
    EditComponent {
        id: u64,
        field: ComponentField,
        raw: String,
    },
    /// Raw text typed into the final-exam weight field.
    SetFinalWeight { raw: String },
    /// A fixed preset target grade was chosen.
    SelectPresetTarget { grade: f64 },
    /// Free-form target text; parse failure means no target is selected.
    SetCustomTarget { raw: String },
    /// Scenario value moved through the continuous slider.
    ScenarioSlider { value: i64 },
    /// Scenario value chosen through a discrete preset button.
    ScenarioPreset { value: i64 },
    /// Append a fresh blank component.
    AddComponent,
    /// Remove the component with this id; unknown ids are ignored.
    RemoveComponent { id: u64 },
    /// Calculate immediately, bypassing the debounce window.
    CalculateNow,
    /// Clear everything and seed the starting components again.
    Reset,
}

/// Parses a weight field. Absent or unparseable text is a weight of 0.
pub fn parse_weight(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .unwrap_or(0.0)
}

/// Parses a score field. Empty or unparseable text means "no score yet".
pub fn parse_score(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|s| s.is_finite())
}

/// Parses a free-form target grade. Unparseable text leaves the target
/// unselected.
pub fn parse_target(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|t| t.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight_lenient() {
        assert_eq!(parse_weight("30"), 30.0);
        assert_eq!(parse_weight(" 12.5 "), 12.5);
        assert_eq!(parse_weight(""), 0.0);
        assert_eq!(parse_weight("abc"), 0.0);
        assert_eq!(parse_weight("inf"), 0.0);
        assert_eq!(parse_weight("NaN"), 0.0);
        // Out-of-range values are kept as entered.
        assert_eq!(parse_weight("150"), 150.0);
        assert_eq!(parse_weight("-5"), -5.0);
    }

    #[test]
    fn test_parse_score_absent_on_failure() {
        assert_eq!(parse_score("80"), Some(80.0));
        assert_eq!(parse_score(" 99.5 "), Some(99.5));
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("n/a"), None);
        assert_eq!(parse_score("inf"), None);
        assert_eq!(parse_score("150"), Some(150.0));
    }

    #[test]
    fn test_parse_target_keeps_zero() {
        // A target of 0 is a number, not an empty selection.
        assert_eq!(parse_target("0"), Some(0.0));
        assert_eq!(parse_target("85"), Some(85.0));
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("ninety"), None);
    }
}
