//! # climate-adapter-tapo
//!
//! Tapo adapter: exposes a TP-Link Tapo P100 smart plug as an
//! [`Actuator`].
//!
//! The plug protocol (handshake, session key, encrypted requests) is handled
//! entirely by the `tapo` crate. Every query and command opens a fresh
//! session so a plug that rebooted or lost its session between two readings
//! is picked up again without special handling.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `climate-app` and `climate-domain`.

mod config;
mod error;

pub use config::TapoCredentials;
pub use error::TapoError;

use tapo::ApiClient;

use climate_app::ports::Actuator;
use climate_domain::error::ActuatorError;
use climate_domain::switch::{ActuatorState, SwitchState};

/// A Tapo P100 plug reachable at a fixed IP address.
#[derive(Debug, Clone)]
pub struct TapoRelay {
    credentials: TapoCredentials,
    address: String,
}

impl TapoRelay {
    /// Create a relay for the plug at `address` using `credentials`.
    ///
    /// No network traffic happens until the first query.
    #[must_use]
    pub fn new(credentials: &TapoCredentials, address: impl Into<String>) -> Self {
        Self {
            credentials: credentials.clone(),
            address: address.into(),
        }
    }

    /// Fresh, not yet authenticated API client.
    fn client(&self) -> ApiClient {
        ApiClient::new(
            self.credentials.username.clone(),
            self.credentials.password.clone(),
        )
    }
}

impl Actuator for TapoRelay {
    fn label(&self) -> &str {
        &self.address
    }

    async fn query_state(&self) -> Result<ActuatorState, ActuatorError> {
        let device = self
            .client()
            .p100(self.address.clone())
            .await
            .map_err(|source| {
                TapoError::Connect {
                    address: self.address.clone(),
                    source,
                }
                .into_query_error()
            })?;

        let info = device.get_device_info().await.map_err(|source| {
            TapoError::Request {
                address: self.address.clone(),
                source,
            }
            .into_query_error()
        })?;

        tracing::debug!(
            address = %self.address,
            device_on = info.device_on,
            "Tapo device info read"
        );
        Ok(ActuatorState {
            is_on: info.device_on,
        })
    }

    async fn set_state(&self, state: SwitchState) -> Result<(), ActuatorError> {
        let device = self
            .client()
            .p100(self.address.clone())
            .await
            .map_err(|source| {
                TapoError::Connect {
                    address: self.address.clone(),
                    source,
                }
                .into_command_error(state)
            })?;

        let result = match state {
            SwitchState::On => device.on().await,
            SwitchState::Off => device.off().await,
        };
        result.map_err(|source| {
            TapoError::Request {
                address: self.address.clone(),
                source,
            }
            .into_command_error(state)
        })?;

        tracing::debug!(address = %self.address, %state, "Tapo device switched");
        Ok(())
    }
}
