//! Telemetry intake: decode one inbound message and feed the dispatcher.
//!
//! Payloads look like:
//!
//! ```json
//! { "sensor_type": "humidity", "value": 55.2, "unit": "%" }
//! ```
//!
//! Anything that is not a JSON object is a decode error; a missing or bad
//! `sensor_type`/`value` is a parameter error. Either way the message is
//! dropped and reported, and the next message is processed normally.

use std::sync::Arc;

use serde_json::{Map, Value};

use climate_domain::error::{ClimateError, ParameterError};
use climate_domain::sensor::{SensorReading, SensorType};

use crate::context::ControlContext;
use crate::dispatcher::ControlDispatcher;
use crate::executor::ActuationOutcome;
use crate::ports::{Actuator, Delay, TelemetryHandler};

/// Parse a raw payload into a validated [`SensorReading`].
///
/// `unit` is informational; when absent or not a string it is left empty.
///
/// # Errors
///
/// Returns [`ClimateError::Decode`] when the payload is not a JSON object and
/// [`ClimateError::Parameter`] when `sensor_type` or `value` is missing or
/// invalid. A `value` too large for `f64` (such as `1e400`) is already
/// refused by the JSON parser and therefore reported as a decode error.
pub fn decode(payload: &[u8]) -> Result<SensorReading, ClimateError> {
    let record: Map<String, Value> = serde_json::from_slice(payload)?;

    let sensor_type = match record.get("sensor_type") {
        None | Some(Value::Null) => return Err(ParameterError::MissingSensorType.into()),
        Some(Value::String(name)) => name.parse::<SensorType>()?,
        Some(_) => return Err(ParameterError::SensorTypeNotAString.into()),
    };

    let value = match record.get("value") {
        None | Some(Value::Null) => return Err(ParameterError::MissingValue.into()),
        Some(Value::Number(number)) => number.as_f64().ok_or(ParameterError::NonNumericValue)?,
        Some(_) => return Err(ParameterError::NonNumericValue.into()),
    };

    let unit = record
        .get("unit")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(SensorReading::new(sensor_type, value, unit)?)
}

/// Entry point for inbound messages.
pub struct TelemetryIntake<A, D> {
    dispatcher: ControlDispatcher<A, D>,
}

impl<A, D> Clone for TelemetryIntake<A, D> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<A: Actuator, D: Delay> TelemetryIntake<A, D> {
    pub fn new(context: Arc<ControlContext<A, D>>) -> Self {
        Self {
            dispatcher: ControlDispatcher::new(context),
        }
    }

    /// Decode and dispatch one payload, returning the typed result.
    ///
    /// # Errors
    ///
    /// Returns decode and parameter errors from [`decode`], and
    /// [`ClimateError::UnknownSensorType`] from the dispatcher.
    pub async fn process(&self, payload: &[u8]) -> Result<ActuationOutcome, ClimateError> {
        let reading = decode(payload)?;
        tracing::info!(
            sensor_type = %reading.sensor_type,
            value = reading.value,
            unit = %reading.unit,
            "reading parsed"
        );
        self.dispatcher.dispatch(&reading).await
    }
}

impl<A: Actuator, D: Delay> TelemetryHandler for TelemetryIntake<A, D> {
    async fn handle_message(&self, topic: &str, payload: &[u8]) {
        tracing::info!(
            topic,
            payload = %String::from_utf8_lossy(payload),
            "message received"
        );

        match self.process(payload).await {
            Ok(outcome) => {
                tracing::debug!(
                    topic,
                    attempts = outcome.attempts(),
                    converged = outcome.is_converged(),
                    "message handled"
                );
            }
            Err(err) => report(topic, payload, &err),
        }
    }
}

/// Log a dropped message at a level matching its cause.
fn report(topic: &str, payload: &[u8], err: &ClimateError) {
    let payload = String::from_utf8_lossy(payload);
    match err {
        ClimateError::Decode(source) => {
            tracing::error!(
                topic,
                %payload,
                error = %source,
                "failed to decode message, dropping it"
            );
        }
        ClimateError::Parameter(ParameterError::UnrecognizedSensorType(name)) => {
            tracing::warn!(
                topic,
                sensor_type = %name,
                "unknown sensor type received, dropping message"
            );
        }
        ClimateError::Parameter(source) => {
            tracing::error!(topic, %payload, error = %source, "invalid message, dropping it");
        }
        ClimateError::UnknownSensorType(sensor_type) => {
            tracing::warn!(
                topic,
                %sensor_type,
                "no actuator configured for sensor type, dropping message"
            );
        }
        other => {
            tracing::error!(topic, error = %other, "error processing message");
        }
    }
}
