//! Switch state: what a relay is doing, and what we want it to do.

/// Desired or observed on/off state of a relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    /// `true` for [`On`](Self::On).
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for SwitchState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl std::fmt::Display for SwitchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// Live state reported by an actuator.
///
/// Always queried right before a decision is acted upon; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorState {
    pub is_on: bool,
}

impl ActuatorState {
    /// The reported state as a [`SwitchState`].
    #[must_use]
    pub fn switch_state(self) -> SwitchState {
        SwitchState::from(self.is_on)
    }

    /// Whether the device already is in `desired`.
    #[must_use]
    pub fn matches(self, desired: SwitchState) -> bool {
        self.is_on == desired.is_on()
    }
}

impl From<SwitchState> for ActuatorState {
    fn from(state: SwitchState) -> Self {
        Self {
            is_on: state.is_on(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_bool_to_switch_state() {
        assert_eq!(SwitchState::from(true), SwitchState::On);
        assert_eq!(SwitchState::from(false), SwitchState::Off);
    }

    #[test]
    fn should_display_lowercase() {
        assert_eq!(SwitchState::On.to_string(), "on");
        assert_eq!(SwitchState::Off.to_string(), "off");
    }

    #[test]
    fn should_match_when_device_already_in_desired_state() {
        let state = ActuatorState { is_on: true };
        assert!(state.matches(SwitchState::On));
        assert!(!state.matches(SwitchState::Off));
    }

    #[test]
    fn should_convert_actuator_state_to_switch_state() {
        assert_eq!(
            ActuatorState { is_on: false }.switch_state(),
            SwitchState::Off
        );
        assert_eq!(
            ActuatorState::from(SwitchState::On),
            ActuatorState { is_on: true }
        );
    }
}
