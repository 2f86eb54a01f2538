//! Tapo adapter error types.

use climate_domain::error::ActuatorError;
use climate_domain::switch::SwitchState;

/// Errors specific to the Tapo adapter.
#[derive(Debug, thiserror::Error)]
pub enum TapoError {
    /// Handshake or login with the plug failed.
    #[error("failed to connect to Tapo device at {address}")]
    Connect {
        address: String,
        #[source]
        source: tapo::Error,
    },

    /// The plug rejected or failed a request after login.
    #[error("Tapo request to {address} failed")]
    Request {
        address: String,
        #[source]
        source: tapo::Error,
    },
}

impl TapoError {
    /// Wrap as a failed state query.
    #[must_use]
    pub fn into_query_error(self) -> ActuatorError {
        ActuatorError::Query(Box::new(self))
    }

    /// Wrap as a failed command towards `state`.
    #[must_use]
    pub fn into_command_error(self, state: SwitchState) -> ActuatorError {
        ActuatorError::Command {
            state,
            source: Box::new(self),
        }
    }
}
