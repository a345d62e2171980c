/// The assumed score (0–100) applied to components that have weight but no
/// recorded score yet.
///
/// A continuous slider and discrete preset buttons are two entry paths into
/// the same stored value; whichever path sets it, the other reads the same
/// number back for display synchronization.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    value: u8,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current assumed score.
    pub fn value(self) -> u8 {
        self.value
    }

    /// Sets the value through the slider path.
    pub fn set_from_slider(&mut self, value: i64) {
        self.set(value);
    }

    /// Sets the value through the preset-button path.
    pub fn set_from_preset(&mut self, value: i64) {
        self.set(value);
    }

    /// Back to the default assumption of 0.
    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub(crate) fn set(&mut self, value: i64) {
        self.value = value.clamp(0, 100) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_zero() {
        assert_eq!(Scenario::new().value(), 0);
    }

    #[test]
    fn test_both_paths_set_the_same_value() {
        let mut via_slider = Scenario::new();
        let mut via_preset = Scenario::new();

        via_slider.set_from_slider(60);
        via_preset.set_from_preset(60);

        assert_eq!(via_slider, via_preset);
        assert_eq!(via_slider.value(), 60);
    }

    #[test]
    fn test_clamps_into_range() {
        let mut scenario = Scenario::new();

        scenario.set_from_slider(150);
        assert_eq!(scenario.value(), 100);

        scenario.set_from_preset(-20);
        assert_eq!(scenario.value(), 0);
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let mut scenario = Scenario::new();
        scenario.set_from_preset(75);
        scenario.reset();
        assert_eq!(scenario.value(), 0);
    }
}
