//! # climate-adapter-virtual
//!
//! Virtual relays for running the controller without hardware.
//!
//! A [`VirtualRelay`] keeps its on/off state in memory, answers queries
//! instantly and never fails. Commands are logged and counted, which makes
//! it useful both as a dry-run backend for `climated` and as the actuator in
//! end-to-end tests.
//!
//! ## Dependency rule
//!
//! Depends on `climate-app` (port traits) and `climate-domain` only.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use climate_app::ports::Actuator;
use climate_domain::error::ActuatorError;
use climate_domain::switch::{ActuatorState, SwitchState};

/// A simulated relay that can be switched on and off.
#[derive(Debug)]
pub struct VirtualRelay {
    label: String,
    state: Mutex<SwitchState>,
    commands: AtomicU32,
}

impl VirtualRelay {
    /// Create a relay in the given initial state.
    #[must_use]
    pub fn new(label: impl Into<String>, initial: SwitchState) -> Self {
        Self {
            label: label.into(),
            state: Mutex::new(initial),
            commands: AtomicU32::new(0),
        }
    }

    /// Create a relay that starts switched off.
    #[must_use]
    pub fn off(label: impl Into<String>) -> Self {
        Self::new(label, SwitchState::Off)
    }

    /// Current simulated state.
    #[must_use]
    pub fn state(&self) -> SwitchState {
        *self.lock_state()
    }

    /// How many commands were received since creation.
    #[must_use]
    pub fn command_count(&self) -> u32 {
        self.commands.load(Ordering::SeqCst)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SwitchState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Actuator for VirtualRelay {
    fn label(&self) -> &str {
        &self.label
    }

    async fn query_state(&self) -> Result<ActuatorState, ActuatorError> {
        Ok(ActuatorState::from(self.state()))
    }

    async fn set_state(&self, state: SwitchState) -> Result<(), ActuatorError> {
        let previous = std::mem::replace(&mut *self.lock_state(), state);
        self.commands.fetch_add(1, Ordering::SeqCst);
        tracing::info!(
            relay = %self.label,
            from = %previous,
            to = %state,
            "virtual relay switched"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_off() {
        let relay = VirtualRelay::off("heater");
        assert_eq!(relay.state(), SwitchState::Off);
        assert_eq!(relay.label(), "heater");
    }

    #[tokio::test]
    async fn should_report_initial_state() {
        let relay = VirtualRelay::new("humidifier", SwitchState::On);
        let state = relay.query_state().await.unwrap();
        assert!(state.is_on);
    }

    #[tokio::test]
    async fn should_turn_on_when_commanded() {
        let relay = VirtualRelay::off("heater");
        relay.set_state(SwitchState::On).await.unwrap();
        assert_eq!(relay.state(), SwitchState::On);
        assert!(relay.query_state().await.unwrap().is_on);
    }

    #[tokio::test]
    async fn should_turn_off_when_commanded() {
        let relay = VirtualRelay::new("heater", SwitchState::On);
        relay.set_state(SwitchState::Off).await.unwrap();
        assert_eq!(relay.state(), SwitchState::Off);
    }

    #[tokio::test]
    async fn should_count_commands() {
        let relay = VirtualRelay::off("heater");
        relay.set_state(SwitchState::On).await.unwrap();
        relay.set_state(SwitchState::On).await.unwrap();
        assert_eq!(relay.command_count(), 2);
    }

    #[tokio::test]
    async fn should_not_count_queries() {
        let relay = VirtualRelay::off("heater");
        relay.query_state().await.unwrap();
        assert_eq!(relay.command_count(), 0);
    }
}
