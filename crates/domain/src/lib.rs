//! # climate-domain
//!
//! Pure domain model for the climate controller.
//!
//! ## Responsibilities
//! - Sensor vocabulary: [`SensorType`](sensor::SensorType) and the
//!   [`SensorReading`](sensor::SensorReading) carried by each inbound message
//! - Tolerance bands ([`Range`](range::Range)) and the deadband rule that
//!   turns a reading into a desired [`SwitchState`](switch::SwitchState)
//! - Live actuator state as reported by a relay
//! - The error taxonomy shared by every layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod range;
pub mod sensor;
pub mod switch;
