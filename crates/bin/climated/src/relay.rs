//! Backend selection for the two relays.

use climate_adapter_tapo::TapoRelay;
use climate_adapter_virtual::VirtualRelay;
use climate_app::ports::Actuator;
use climate_domain::error::{ActuatorError, ConfigurationError};
use climate_domain::sensor::ActuatorRole;
use climate_domain::switch::{ActuatorState, SwitchState};

use crate::config::{ActuatorsConfig, Backend};

/// Relay of either backend, so the directory holds a single actuator type.
#[derive(Debug)]
pub enum Relay {
    Tapo(TapoRelay),
    Virtual(VirtualRelay),
}

impl Relay {
    /// Build the relay playing `role` for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingSetting`] when the Tapo backend
    /// lacks credentials or the plug address for `role`.
    pub fn from_config(
        actuators: &ActuatorsConfig,
        role: ActuatorRole,
    ) -> Result<Self, ConfigurationError> {
        match actuators.backend {
            Backend::Tapo => {
                let credentials = actuators.tapo_credentials()?;
                let address = actuators.address_for(role)?;
                Ok(Self::Tapo(TapoRelay::new(credentials, address)))
            }
            Backend::Virtual => Ok(Self::Virtual(VirtualRelay::off(role.to_string()))),
        }
    }
}

impl Actuator for Relay {
    fn label(&self) -> &str {
        match self {
            Self::Tapo(relay) => relay.label(),
            Self::Virtual(relay) => relay.label(),
        }
    }

    async fn query_state(&self) -> Result<ActuatorState, ActuatorError> {
        match self {
            Self::Tapo(relay) => relay.query_state().await,
            Self::Virtual(relay) => relay.query_state().await,
        }
    }

    async fn set_state(&self, state: SwitchState) -> Result<(), ActuatorError> {
        match self {
            Self::Tapo(relay) => relay.set_state(state).await,
            Self::Virtual(relay) => relay.set_state(state).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use climate_adapter_tapo::TapoCredentials;

    use super::*;

    fn tapo_config() -> ActuatorsConfig {
        ActuatorsConfig {
            backend: Backend::Tapo,
            humidifier_address: Some("192.168.1.20".to_string()),
            heater_address: Some("192.168.1.21".to_string()),
            credentials: TapoCredentials {
                username: "me@example.com".to_string(),
                password: "secret".to_string(),
            },
        }
    }

    #[test]
    fn should_build_tapo_relay_for_role() {
        let relay = Relay::from_config(&tapo_config(), ActuatorRole::Heater).unwrap();
        assert!(matches!(relay, Relay::Tapo(_)));
        assert_eq!(relay.label(), "192.168.1.21");
    }

    #[test]
    fn should_refuse_tapo_relay_without_address() {
        let config = ActuatorsConfig {
            humidifier_address: None,
            ..tapo_config()
        };
        let result = Relay::from_config(&config, ActuatorRole::Humidifier);
        assert!(matches!(
            result,
            Err(ConfigurationError::MissingSetting(
                "actuators.humidifier_address",
            ))
        ));
    }

    #[test]
    fn should_refuse_tapo_relay_without_credentials() {
        let config = ActuatorsConfig {
            credentials: TapoCredentials::default(),
            ..tapo_config()
        };
        let result = Relay::from_config(&config, ActuatorRole::Heater);
        assert!(matches!(
            result,
            Err(ConfigurationError::MissingSetting("actuators.credentials"))
        ));
    }

    #[tokio::test]
    async fn should_drive_virtual_relay() {
        let config = ActuatorsConfig {
            backend: Backend::Virtual,
            ..ActuatorsConfig::default()
        };
        let relay = Relay::from_config(&config, ActuatorRole::Humidifier).unwrap();
        assert_eq!(relay.label(), "humidifier");

        relay.set_state(SwitchState::On).await.unwrap();
        assert!(relay.query_state().await.unwrap().is_on);
    }
}
