//! Error types shared across the workspace.
//!
//! [`ClimateError`] is the umbrella error that crosses port boundaries.
//! Each layer keeps its own typed errors and converts via `#[from]`.

use std::time::Duration;

use crate::sensor::SensorType;
use crate::switch::SwitchState;

/// Boxed source error from an adapter.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error for the control path.
#[derive(Debug, thiserror::Error)]
pub enum ClimateError {
    /// The payload is not a well-formed JSON object.
    #[error("failed to decode payload")]
    Decode(#[from] serde_json::Error),

    /// The payload decoded but a field is missing or invalid.
    #[error("invalid message parameter")]
    Parameter(#[from] ParameterError),

    /// No directory entry exists for the reading's sensor type.
    #[error("no actuator configured for sensor type {0}")]
    UnknownSensorType(SensorType),

    /// Querying or commanding an actuator failed.
    #[error("actuator error")]
    Actuator(#[from] ActuatorError),

    /// Startup configuration is incomplete or invalid.
    #[error("configuration error")]
    Configuration(#[from] ConfigurationError),

    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),
}

/// Details about why an inbound message was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    #[error("missing sensor_type")]
    MissingSensorType,

    #[error("sensor_type must be a string")]
    SensorTypeNotAString,

    #[error("unrecognized sensor_type {0:?}")]
    UnrecognizedSensorType(String),

    #[error("missing value")]
    MissingValue,

    #[error("value must be a number")]
    NonNumericValue,

    #[error("value must be finite")]
    NonFiniteValue,
}

/// Failure talking to a relay. Always transient from the controller's point
/// of view: the executor retries it.
#[derive(Debug, thiserror::Error)]
pub enum ActuatorError {
    /// Reading the live state failed.
    #[error("failed to query actuator state")]
    Query(#[source] BoxError),

    /// Switching the relay failed.
    #[error("failed to switch actuator {state}")]
    Command {
        state: SwitchState,
        #[source]
        source: BoxError,
    },

    /// The device did not answer in time.
    #[error("actuator {operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

/// Fatal, startup-only configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("no directory entry for sensor type {0}")]
    MissingEntry(SensorType),

    #[error("duplicate directory entry for sensor type {0}")]
    DuplicateEntry(SensorType),

    #[error("missing required setting {0}")]
    MissingSetting(&'static str),

    #[error("invalid setting {setting}")]
    Invalid {
        setting: &'static str,
        #[source]
        source: ValidationError,
    },
}

/// Domain invariant violations.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("range minimum {min} is greater than maximum {max}")]
    InvertedRange { min: f64, max: f64 },

    #[error("range bounds must be finite")]
    NonFiniteBound,

    #[error("at least one actuation attempt is required")]
    ZeroAttempts,
}
