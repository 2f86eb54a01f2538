//! Actuator port: one controllable on/off relay.
//!
//! An actuator hides the network address, credentials and wire protocol of
//! a physical (or virtual) relay. The control core only ever asks for the
//! live state and for a state change; whether the adapter blocks a thread or
//! suspends a task underneath is invisible here.

use std::future::Future;

use climate_domain::error::ActuatorError;
use climate_domain::switch::{ActuatorState, SwitchState};

/// A binary relay the controller can observe and switch.
///
/// Implementations live in adapter crates (e.g. `climate-adapter-tapo`).
pub trait Actuator: Send + Sync {
    /// Human-readable identity used in logs (usually the device address).
    fn label(&self) -> &str;

    /// Fetch the live on/off state from the device.
    fn query_state(&self) -> impl Future<Output = Result<ActuatorState, ActuatorError>> + Send;

    /// Switch the device to `state`.
    fn set_state(
        &self,
        state: SwitchState,
    ) -> impl Future<Output = Result<(), ActuatorError>> + Send;
}
