//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the control core and the outside world.
//! They are defined here (in `app`) so that both the core and the adapter
//! crates can depend on them without circular dependencies.

pub mod actuator;
pub mod delay;
pub mod telemetry;

pub use actuator::Actuator;
pub use delay::{Delay, TokioDelay};
pub use telemetry::TelemetryHandler;
