//! # climate-app
//!
//! Application layer: the control core and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement:
//!   - `Actuator`: query and switch one relay
//!   - `Delay`: wait between actuation attempts
//!   - `TelemetryHandler`: accept one inbound pub/sub message
//! - Provide the control path, leaves first:
//!   - [`DeviceDirectory`](directory::DeviceDirectory): sensor type → (actuator, range)
//!   - [`ActuationExecutor`](executor::ActuationExecutor): idempotent, retried convergence
//!   - [`ControlDispatcher`](dispatcher::ControlDispatcher): reading → desired state
//!   - [`TelemetryIntake`](intake::TelemetryIntake): payload → reading
//! - Bundle directory and executor into a [`ControlContext`](context::ControlContext)
//!   built once at startup and shared explicitly
//!
//! ## Dependency rule
//! Depends on `climate-domain` only (plus `tokio` for timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod context;
pub mod directory;
pub mod dispatcher;
pub mod executor;
pub mod intake;
pub mod ports;

#[cfg(test)]
mod testing;
