//! Tolerance band and the deadband decision rule.
//!
//! A single `[min, max]` pair per sensor type, both bounds inclusive. A
//! reading inside the band means "stop driving the actuator" (OFF); a
//! reading outside means "drive it" (ON). There are no separate on/off
//! thresholds.

use serde::Deserialize;

use crate::error::ValidationError;
use crate::switch::SwitchState;

/// Inclusive `[min, max]` interval with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "[f64; 2]")]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// Create a range after checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFiniteBound`] if either bound is NaN or
    /// infinite, and [`ValidationError::InvertedRange`] if `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, ValidationError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ValidationError::NonFiniteBound);
        }
        if min > max {
            return Err(ValidationError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// `min <= value <= max`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Deadband rule: OFF inside the band, ON outside it.
    #[must_use]
    pub fn desired_state(&self, value: f64) -> SwitchState {
        if self.contains(value) {
            SwitchState::Off
        } else {
            SwitchState::On
        }
    }
}

impl TryFrom<[f64; 2]> for Range {
    type Error = ValidationError;

    fn try_from([min, max]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn humidity() -> Range {
        Range::new(40.0, 60.0).unwrap()
    }

    #[test]
    fn should_turn_off_at_lower_bound() {
        assert_eq!(humidity().desired_state(40.0), SwitchState::Off);
    }

    #[test]
    fn should_turn_off_at_upper_bound() {
        assert_eq!(humidity().desired_state(60.0), SwitchState::Off);
    }

    #[test]
    fn should_turn_on_just_below_lower_bound() {
        assert_eq!(humidity().desired_state(40.0 - EPS), SwitchState::On);
    }

    #[test]
    fn should_turn_on_just_above_upper_bound() {
        assert_eq!(humidity().desired_state(60.0 + EPS), SwitchState::On);
    }

    #[test]
    fn should_turn_off_inside_band() {
        assert_eq!(humidity().desired_state(55.0), SwitchState::Off);
    }

    #[test]
    fn should_allow_degenerate_band() {
        let range = Range::new(20.0, 20.0).unwrap();
        assert_eq!(range.desired_state(20.0), SwitchState::Off);
        assert_eq!(range.desired_state(20.1), SwitchState::On);
    }

    #[test]
    fn should_reject_inverted_range() {
        let err = Range::new(24.0, 18.0).unwrap_err();
        assert!(matches!(err, ValidationError::InvertedRange { .. }));
    }

    #[test]
    fn should_reject_nan_bound() {
        assert!(matches!(
            Range::new(f64::NAN, 1.0),
            Err(ValidationError::NonFiniteBound)
        ));
    }

    #[test]
    fn should_deserialize_from_pair() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            humidity: Range,
        }
        let wrapper: Wrapper = toml::from_str("humidity = [40.0, 60.0]").unwrap();
        assert_eq!(wrapper.humidity, humidity());
    }

    #[test]
    fn should_accept_integer_bounds_in_json() {
        let range: Range = serde_json::from_str("[18, 24]").unwrap();
        assert_eq!(range, Range::new(18.0, 24.0).unwrap());
    }

    #[test]
    fn should_refuse_to_deserialize_inverted_pair() {
        let result: Result<Range, _> = serde_json::from_str("[60.0, 40.0]");
        assert!(result.is_err());
    }

    #[test]
    fn should_display_as_interval() {
        assert_eq!(humidity().to_string(), "[40, 60]");
    }
}
