//! Sensor readings and the fixed set of sensor types.
//!
//! Each sensor type is paired with exactly one actuator role: humidity
//! readings drive the humidifier, temperature readings drive the heater.

use std::str::FromStr;

use crate::error::ParameterError;
use crate::time::{Timestamp, now};

/// Kind of quantity a reading measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorType {
    Humidity,
    Temperature,
}

impl SensorType {
    /// Every sensor type the controller knows about.
    pub const ALL: [Self; 2] = [Self::Humidity, Self::Temperature];

    /// Wire name, as found in the `sensor_type` field of a payload.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Humidity => "humidity",
            Self::Temperature => "temperature",
        }
    }

    /// The actuator that corrects this quantity.
    #[must_use]
    pub fn actuator_role(self) -> ActuatorRole {
        match self {
            Self::Humidity => ActuatorRole::Humidifier,
            Self::Temperature => ActuatorRole::Heater,
        }
    }
}

impl std::fmt::Display for SensorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "humidity" => Ok(Self::Humidity),
            "temperature" => Ok(Self::Temperature),
            other => Err(ParameterError::UnrecognizedSensorType(other.to_string())),
        }
    }
}

/// Role of a binary actuator in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActuatorRole {
    Humidifier,
    Heater,
}

impl std::fmt::Display for ActuatorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Humidifier => f.write_str("humidifier"),
            Self::Heater => f.write_str("heater"),
        }
    }
}

/// One validated reading, created per inbound message and then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub sensor_type: SensorType,
    pub value: f64,
    /// Informational only (`%`, `C`, …).
    pub unit: String,
    pub received_at: Timestamp,
}

impl SensorReading {
    /// Build a reading stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NonFiniteValue`] for NaN or infinite values.
    pub fn new(
        sensor_type: SensorType,
        value: f64,
        unit: impl Into<String>,
    ) -> Result<Self, ParameterError> {
        if !value.is_finite() {
            return Err(ParameterError::NonFiniteValue);
        }
        Ok(Self {
            sensor_type,
            value,
            unit: unit.into(),
            received_at: now(),
        })
    }
}
