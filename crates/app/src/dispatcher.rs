//! Control dispatcher: turns a reading into an actuation request.
//!
//! [`decide`] is a pure function of the reading and the directory: look up
//! the actuator and band for the reading's sensor type, then apply the
//! deadband rule (OFF inside `[min, max]`, ON outside). The dispatcher hands
//! the result to the executor and keeps no state between calls.

use std::sync::Arc;

use climate_domain::error::ClimateError;
use climate_domain::range::Range;
use climate_domain::sensor::{ActuatorRole, SensorReading};
use climate_domain::switch::SwitchState;

use crate::context::ControlContext;
use crate::directory::DeviceDirectory;
use crate::executor::ActuationOutcome;
use crate::ports::{Actuator, Delay};

/// The actuator to drive and the state to drive it to.
#[derive(Debug)]
pub struct Decision<'a, A> {
    pub role: ActuatorRole,
    pub actuator: &'a A,
    pub range: Range,
    pub desired: SwitchState,
}

/// Decide what to do with `reading`.
///
/// # Errors
///
/// Returns [`ClimateError::UnknownSensorType`] when the directory has no
/// entry for the reading's sensor type.
pub fn decide<'a, A>(
    reading: &SensorReading,
    directory: &'a DeviceDirectory<A>,
) -> Result<Decision<'a, A>, ClimateError> {
    let entry = directory
        .lookup(reading.sensor_type)
        .ok_or(ClimateError::UnknownSensorType(reading.sensor_type))?;
    let range = entry.range();

    Ok(Decision {
        role: entry.role(),
        actuator: entry.actuator(),
        range,
        desired: range.desired_state(reading.value),
    })
}

/// Routes readings to the executor through a shared [`ControlContext`].
pub struct ControlDispatcher<A, D> {
    context: Arc<ControlContext<A, D>>,
}

impl<A, D> Clone for ControlDispatcher<A, D> {
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
        }
    }
}

impl<A: Actuator, D: Delay> ControlDispatcher<A, D> {
    pub fn new(context: Arc<ControlContext<A, D>>) -> Self {
        Self { context }
    }

    /// Decide and actuate for one reading.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::UnknownSensorType`] when no actuator is
    /// configured for the reading; no actuator is touched in that case.
    /// Actuator failures are not errors here, see [`ActuationOutcome`].
    pub async fn dispatch(
        &self,
        reading: &SensorReading,
    ) -> Result<ActuationOutcome, ClimateError> {
        let decision = decide(reading, self.context.directory())?;

        if decision.desired.is_on() {
            tracing::info!(
                sensor_type = %reading.sensor_type,
                value = reading.value,
                range = %decision.range,
                actuator = decision.actuator.label(),
                role = %decision.role,
                "value outside range, driving actuator on"
            );
        } else {
            tracing::info!(
                sensor_type = %reading.sensor_type,
                value = reading.value,
                range = %decision.range,
                actuator = decision.actuator.label(),
                role = %decision.role,
                "value within range, driving actuator off"
            );
        }

        Ok(self
            .context
            .executor()
            .converge(decision.actuator, decision.desired)
            .await)
    }
}
