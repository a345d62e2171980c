use serde::Serialize;

/// Difficulty band for a required final-exam score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Secured,
    Achievable,
    Difficult,
    Unlikely,
    Impossible,
}

impl Category {
    /// Status line shown next to the result.
    pub fn status_text(self) -> &'static str {
        match self {
            Category::Secured => "You've already secured your target grade!",
            Category::Achievable => "Achievable! Keep studying",
            Category::Difficult => "Difficult but possible",
            Category::Unlikely => "Very unlikely - consider alternatives",
            Category::Impossible => "Not mathematically possible",
        }
    }

    /// Headline above the score figure.
    pub fn headline(self) -> &'static str {
        match self {
            Category::Secured => "Congratulations!",
            _ => "on your final exam",
        }
    }
}

/// Classifies a required final-exam score into a difficulty band.
///
/// | Required score | Category   |
/// |----------------|------------|
/// | <= 0           | Secured    |
/// | (0, 85]        | Achievable |
/// | (85, 95]       | Difficult  |
/// | (95, 100]      | Unlikely   |
/// | > 100          | Impossible |
///
/// Upper bounds are inclusive except for the final unbounded band. This
/// drives presentation only; no further computation happens here.
pub fn classify(required_score: f64) -> Category {
    match required_score {
        s if s <= 0.0 => Category::Secured,
        s if s <= 85.0 => Category::Achievable,
        s if s <= 95.0 => Category::Difficult,
        s if s <= 100.0 => Category::Unlikely,
        _ => Category::Impossible,
    }
}
